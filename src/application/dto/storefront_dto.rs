//! Storefront form DTOs.

use std::path::PathBuf;

use crate::domain::entities::{MAX_PRESCRIPTION_IMAGES, OrderId};
use crate::domain::errors::ValidationErrors;
use crate::domain::ports::{PrescriptionUpload, ProfileUpdate};

pub mod fields {
    pub const DELIVERY_ADDRESS: &str = "delivery_address";
    pub const ORDER_ID: &str = "order_id";
    pub const IMAGES: &str = "images";
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub delivery_address: String,
}

impl CheckoutForm {
    /// Returns the trimmed address.
    ///
    /// # Errors
    /// Fails when the address is blank.
    pub fn validate(&self) -> Result<String, ValidationErrors> {
        let address = self.delivery_address.trim();
        if address.is_empty() {
            return Err(ValidationErrors::single(
                fields::DELIVERY_ADDRESS,
                "Delivery address is required",
            ));
        }
        Ok(address.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl ProfileForm {
    /// # Errors
    /// Fails when either name is blank.
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.first_name.trim().is_empty() {
            errors.add(super::auth_dto::fields::FIRST_NAME, "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.add(super::auth_dto::fields::LAST_NAME, "Last name is required");
        }
        errors.into_result(ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

/// Prescription upload entry: an order id and comma separated image paths.
#[derive(Debug, Clone, Default)]
pub struct PrescriptionForm {
    pub order_id: String,
    pub images: String,
}

impl PrescriptionForm {
    #[must_use]
    pub fn image_paths(&self) -> Vec<PathBuf> {
        self.images
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    /// # Errors
    /// Fails on a missing or non-numeric order id, no images, or too many images.
    pub fn validate(&self) -> Result<PrescriptionUpload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let order_id = if self.order_id.trim().is_empty() {
            errors.add(fields::ORDER_ID, "Order number is required");
            None
        } else {
            let parsed = self.order_id.parse::<OrderId>().ok();
            if parsed.is_none() {
                errors.add(fields::ORDER_ID, "Order number must be numeric");
            }
            parsed
        };

        let images = self.image_paths();
        if images.is_empty() {
            errors.add(fields::IMAGES, "Select at least one image");
        } else if images.len() > MAX_PRESCRIPTION_IMAGES {
            errors.add(
                fields::IMAGES,
                format!("At most {MAX_PRESCRIPTION_IMAGES} images can be uploaded"),
            );
        }

        match order_id {
            Some(order_id) => errors.into_result(PrescriptionUpload::new(order_id, images)),
            None => Err(errors),
        }
    }
}
