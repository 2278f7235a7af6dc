use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::packages::{EditPackageEntity, InsertPackageEntity, PackageEntity};

pub const MAX_DURATION_MONTHS: i32 = 120;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageModel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub duration_months: i32,
    pub price_minor: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PackageEntity> for PackageModel {
    fn from(value: PackageEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            duration_months: value.duration_months,
            price_minor: value.price_minor,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePackageModel {
    pub name: String,
    pub description: String,
    pub duration_months: i32,
    pub price_minor: i32,
    pub is_active: Option<bool>,
}

impl CreatePackageModel {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        validate_duration(self.duration_months)?;
        validate_price(self.price_minor)?;
        Ok(())
    }

    pub fn to_entity(&self) -> InsertPackageEntity {
        InsertPackageEntity {
            name: self.name.clone(),
            description: self.description.clone(),
            duration_months: self.duration_months,
            price_minor: self.price_minor,
            is_active: self.is_active.unwrap_or(true),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPackageModel {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_months: Option<i32>,
    pub price_minor: Option<i32>,
    pub is_active: Option<bool>,
}

impl EditPackageModel {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(duration_months) = self.duration_months {
            validate_duration(duration_months)?;
        }
        if let Some(price_minor) = self.price_minor {
            validate_price(price_minor)?;
        }
        Ok(())
    }

    pub fn to_entity(&self) -> EditPackageEntity {
        EditPackageEntity {
            name: self.name.clone(),
            description: self.description.clone(),
            duration_months: self.duration_months,
            price_minor: self.price_minor,
            is_active: self.is_active,
            updated_at: Utc::now(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Package name is required.".to_string());
    }
    if name.len() > 255 {
        return Err("Package name cannot exceed 255 characters.".to_string());
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("Package description is required.".to_string());
    }
    Ok(())
}

fn validate_duration(duration_months: i32) -> Result<(), String> {
    if duration_months < 1 {
        return Err("Duration must be at least 1 month.".to_string());
    }
    if duration_months > MAX_DURATION_MONTHS {
        return Err("Duration cannot exceed 120 months.".to_string());
    }
    Ok(())
}

fn validate_price(price_minor: i32) -> Result<(), String> {
    if price_minor < 0 {
        return Err("Price must be at least 0.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create() -> CreatePackageModel {
        CreatePackageModel {
            name: "Basic".to_string(),
            description: "One month of access".to_string(),
            duration_months: 1,
            price_minor: 99000,
            is_active: None,
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        assert!(sample_create().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let mut model = sample_create();
        model.name = "  ".to_string();
        assert_eq!(
            model.validate().unwrap_err(),
            "Package name is required.".to_string()
        );
    }

    #[test]
    fn rejects_out_of_range_duration() {
        let mut model = sample_create();
        model.duration_months = 0;
        assert!(model.validate().is_err());

        model.duration_months = 121;
        assert!(model.validate().is_err());

        model.duration_months = 120;
        assert!(model.validate().is_ok());
    }

    #[test]
    fn rejects_negative_price() {
        let mut model = sample_create();
        model.price_minor = -1;
        assert_eq!(
            model.validate().unwrap_err(),
            "Price must be at least 0.".to_string()
        );
    }

    #[test]
    fn defaults_new_packages_to_active() {
        assert!(sample_create().to_entity().is_active);
    }

    #[test]
    fn edit_validates_only_provided_fields() {
        let model = EditPackageModel {
            name: None,
            description: None,
            duration_months: Some(6),
            price_minor: None,
            is_active: Some(false),
        };
        assert!(model.validate().is_ok());
    }
}
