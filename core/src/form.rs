//! Editable text fields behind the create and edit screens.

use crate::error::ValidationError;
use crate::types::{NewProduct, Product, ProductId, Rating, PLACEHOLDER_IMAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Price,
    Description,
    Category,
    Image,
}

/// Raw user input. Price is kept as text until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing product, rendering the price as text.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Price => self.price = value,
            FormField::Description => self.description = value,
            FormField::Category => self.category = value,
            FormField::Image => self.image = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Price => &self.price,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
            FormField::Image => &self.image,
        }
    }

    /// Checks title then price, returning the first problem found.
    pub fn validate(&self) -> Result<f64, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        let price = self.price.trim();
        if price.is_empty() {
            return Err(ValidationError::MissingPrice);
        }
        match price.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ValidationError::InvalidPrice(price.to_string())),
        }
    }

    /// Draft for a new product. A blank image becomes the placeholder and the
    /// rating starts at zero.
    pub fn to_new_product(&self) -> Result<NewProduct, ValidationError> {
        let price = self.validate()?;
        let image = if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            self.image.clone()
        };
        Ok(NewProduct {
            title: self.title.clone(),
            price,
            description: self.description.clone(),
            category: self.category.clone(),
            image,
            rating: Rating::default(),
        })
    }

    /// Full replacement record for `id`, carrying over the existing rating.
    pub fn to_product(&self, id: ProductId, rating: Rating) -> Result<Product, ValidationError> {
        let price = self.validate()?;
        Ok(Product {
            id,
            title: self.title.clone(),
            price,
            description: self.description.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
            rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(title: &str, price: &str) -> ProductForm {
        let mut form = ProductForm::new();
        form.set(FormField::Title, title);
        form.set(FormField::Price, price);
        form
    }

    #[test]
    fn blank_title_is_rejected_first() {
        assert_eq!(filled("   ", "").validate(), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn blank_price_is_rejected() {
        assert_eq!(filled("Lamp", " ").validate(), Err(ValidationError::MissingPrice));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        assert_eq!(
            filled("Lamp", "abc").validate(),
            Err(ValidationError::InvalidPrice("abc".to_string()))
        );
        assert!(matches!(
            filled("Lamp", "inf").validate(),
            Err(ValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn price_is_parsed_after_trimming() {
        assert_eq!(filled("Lamp", " 19.99 ").validate(), Ok(19.99));
    }

    #[test]
    fn new_product_gets_placeholder_image_and_zero_rating() {
        let draft = filled("Lamp", "19.99").to_new_product().unwrap();
        assert_eq!(draft.image, PLACEHOLDER_IMAGE);
        assert_eq!(draft.rating, Rating { rate: 0.0, count: 0 });
        assert_eq!(draft.price, 19.99);
    }

    #[test]
    fn explicit_image_is_kept() {
        let mut form = filled("Lamp", "5");
        form.set(FormField::Image, "https://img.test/lamp.png");
        assert_eq!(form.to_new_product().unwrap().image, "https://img.test/lamp.png");
    }

    #[test]
    fn prefill_round_trips_price() {
        let product = Product {
            id: ProductId(4),
            title: "Mug".to_string(),
            price: 12.5,
            description: "Ceramic".to_string(),
            category: "kitchen".to_string(),
            image: String::new(),
            rating: Rating { rate: 4.5, count: 12 },
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.get(FormField::Price), "12.5");

        let rebuilt = form.to_product(product.id, product.rating).unwrap();
        assert_eq!(rebuilt, product);
    }

    #[test]
    fn edit_does_not_substitute_placeholder() {
        let product = filled("Mug", "3").to_product(ProductId(1), Rating::default()).unwrap();
        assert_eq!(product.image, "");
    }
}
