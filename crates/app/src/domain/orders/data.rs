//! Orders Data

use serde::{Deserialize, Serialize};

use crate::domain::orders::errors::OrdersServiceError;

/// Contact and shipping details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

impl CustomerDetails {
    /// Trim every field and check that none is blank.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::IncompleteCustomer`] naming the first
    /// missing field, or `email` when it has no `@`.
    pub fn normalized(self) -> Result<Self, OrdersServiceError> {
        let customer = Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
        };

        let fields = [
            ("name", &customer.name),
            ("email", &customer.email),
            ("phone", &customer.phone),
            ("address", &customer.address),
            ("city", &customer.city),
        ];

        if let Some((field, _)) = fields.into_iter().find(|(_, value)| value.is_empty()) {
            return Err(OrdersServiceError::IncompleteCustomer(field));
        }

        if !customer.email.contains('@') {
            return Err(OrdersServiceError::IncompleteCustomer("email"));
        }

        Ok(customer)
    }
}
