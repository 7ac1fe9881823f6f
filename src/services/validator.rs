use crate::{
    config::OrderLimits,
    error::ValidationError,
    models::{OrderSide, OrderType},
};

/// The parsed enums of a request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidOrder {
    pub side: OrderSide,
    pub order_type: OrderType,
}

/// Checks order parameters against the static rules. Checks run in the order
/// side, type, quantity, price, stop price; the first failure is returned.
pub fn validate(
    side: &str,
    order_type: &str,
    quantity: f64,
    price: Option<f64>,
    stop_price: Option<f64>,
    limits: &OrderLimits,
) -> Result<ValidOrder, ValidationError> {
    let side = OrderSide::parse(side).ok_or_else(|| ValidationError::InvalidSide(side.to_string()))?;

    let order_type = OrderType::parse(order_type)
        .ok_or_else(|| ValidationError::InvalidType(order_type.to_string()))?;

    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ValidationError::InvalidQuantity {
            quantity,
            reason: "Quantity must be a positive number".to_string(),
        });
    }

    if quantity < limits.min_quantity || quantity > limits.max_quantity {
        return Err(ValidationError::InvalidQuantity {
            quantity,
            reason: format!(
                "Quantity must be between {} and {}",
                limits.min_quantity, limits.max_quantity
            ),
        });
    }

    if order_type.requires_price() && price.is_none() {
        return Err(ValidationError::MissingPrice(order_type));
    }
    check_price("Price", price)?;

    if order_type.requires_stop_price() && stop_price.is_none() {
        return Err(ValidationError::MissingStopPrice(order_type));
    }
    check_price("Stop price", stop_price)?;

    Ok(ValidOrder { side, order_type })
}

// a price that is given must be usable, even on types that ignore it
fn check_price(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(ValidationError::InvalidPrice { field, value: v }),
        _ => Ok(()),
    }
}
