//! Pizza Cart Tools
//!
//! The four tools exposed to the agent. Cart errors come back as results
//! flagged `isError` so the agent can retry; malformed arguments are
//! `ToolError`s and become JSON-RPC errors.

use serde_json::{json, Value};

use super::helpers::{parse_arguments, require_name};
use super::models::*;
use super::registry::ToolRegistry;
use crate::cart::helpers::{format_item_summary, format_money};
use crate::cart::{AppState, RemoveOutcome};
use crate::catalog::{Pizza, PizzaFilter};
use crate::error::ToolError;

/// Builds the registry with every pizza cart tool.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry
        .register(
            LIST_PIZZAS_TOOL,
            "List pizzas",
            "Lists the pizzas on the menu, optionally filtered by maximum price, allergens to avoid and ingredients that must be present.",
            json!({
                "type": "object",
                "properties": {
                    "maxPrice": { "type": "number", "minimum": 0, "description": "Only pizzas costing at most this much" },
                    "excludeAllergens": { "type": "array", "items": { "type": "string" }, "description": "Drop pizzas containing any of these allergens" },
                    "includeIngredients": { "type": "array", "items": { "type": "string" }, "description": "Only pizzas containing all of these ingredients" }
                },
                "additionalProperties": false
            }),
            list_pizzas,
        )
        .register(
            ADD_TO_CART_TOOL,
            "Add pizza to cart",
            "Adds a pizza from the menu to the cart and returns the updated cart.",
            cart_line_schema(),
            add_to_cart,
        )
        .register(
            REMOVE_FROM_CART_TOOL,
            "Remove pizza from cart",
            "Removes some or all of a pizza from the cart and returns the updated cart.",
            cart_line_schema(),
            remove_from_cart,
        )
        .register(
            GET_CART_TOOL,
            "Show cart",
            "Returns the cart contents with line totals and the subtotal.",
            json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            get_cart,
        );

    registry
}

fn cart_line_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Pizza name, case-insensitive" },
            "quantity": { "type": "integer", "minimum": 1, "default": 1 }
        },
        "required": ["name"],
        "additionalProperties": false
    })
}

// =============================================================================
// Tool Handlers
// =============================================================================

fn list_pizzas(state: &AppState, args: Value) -> Result<ToolCallResult, ToolError> {
    let filter: PizzaFilter = parse_arguments(args)?;
    let pizzas = state.catalog.filter(&filter);

    let text = if pizzas.is_empty() {
        String::from("No pizzas match these filters.")
    } else {
        let lines = pizzas.iter().map(|p| describe_pizza(p)).collect::<Vec<_>>();
        format!("Found {} pizza(s):\n{}", pizzas.len(), lines.join("\n"))
    };

    Ok(ToolCallResult::success(
        text,
        json!({ "pizzas": pizzas, "count": pizzas.len() }),
    ))
}

fn add_to_cart(state: &AppState, args: Value) -> Result<ToolCallResult, ToolError> {
    let input: CartLineInput = parse_arguments(args)?;
    let name = require_name(&input.name)?;

    let (outcome, cart) = match state.cart.add_to_cart_with_snapshot(name, input.quantity) {
        Ok(update) => update,
        Err(err) => return Ok(ToolCallResult::error(err.to_string())),
    };

    let text = format!(
        "Added {}x {} ({} {} each). Cart: {}",
        outcome.added,
        outcome.name,
        format_money(outcome.unit_price),
        cart.currency,
        format_item_summary(&cart)
    );

    Ok(ToolCallResult::success(
        text,
        json!({ "added": outcome, "cart": cart }),
    ))
}

fn remove_from_cart(state: &AppState, args: Value) -> Result<ToolCallResult, ToolError> {
    let input: CartLineInput = parse_arguments(args)?;
    let name = require_name(&input.name)?;

    let (outcome, cart) = match state.cart.remove_from_cart_with_snapshot(name, input.quantity) {
        Ok(update) => update,
        Err(err) => return Ok(ToolCallResult::error(err.to_string())),
    };

    let change = match &outcome {
        RemoveOutcome::Updated { name, quantity } => {
            format!("Updated {}: {} left.", name, quantity)
        }
        RemoveOutcome::Removed { name } => format!("Removed {} from the cart.", name),
    };
    let text = format!("{} Cart: {}", change, format_item_summary(&cart));

    Ok(ToolCallResult::success(
        text,
        json!({ "removed": outcome, "cart": cart }),
    ))
}

fn get_cart(state: &AppState, args: Value) -> Result<ToolCallResult, ToolError> {
    let _: GetCartInput = parse_arguments(args)?;
    let cart = state.cart.snapshot();

    Ok(ToolCallResult::success(
        format_item_summary(&cart),
        serde_json::to_value(&cart)?,
    ))
}

fn describe_pizza(pizza: &Pizza) -> String {
    let mut line = format!(
        "- {} ({}): {}",
        pizza.name,
        format_money(pizza.price),
        pizza.ingredients.join(", ")
    );
    if !pizza.allergens.is_empty() {
        line.push_str(&format!(" [allergens: {}]", pizza.allergens.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn state() -> AppState {
        AppState::new(Catalog::new(vec![
            Pizza {
                name: "BBQ Chicken".into(),
                price: 12.0,
                ingredients: vec!["chicken".into(), "bbq sauce".into()],
                allergens: vec!["gluten".into()],
            },
            Pizza {
                name: "Margherita".into(),
                price: 8.0,
                ingredients: vec!["tomato".into(), "mozzarella".into()],
                allergens: vec!["gluten".into(), "dairy".into()],
            },
        ]))
    }

    #[test]
    fn list_pizzas_filters_by_price() {
        let registry = default_registry();
        let result = registry
            .call(&state(), LIST_PIZZAS_TOOL, json!({ "maxPrice": 10 }))
            .unwrap();

        let pizzas = &result.structured_content.unwrap()["pizzas"];
        assert_eq!(pizzas.as_array().unwrap().len(), 1);
        assert_eq!(pizzas[0]["name"], "Margherita");
    }

    #[test]
    fn list_pizzas_without_arguments_lists_everything() {
        let result = default_registry()
            .call(&state(), LIST_PIZZAS_TOOL, Value::Null)
            .unwrap();
        assert!(result.text().contains("BBQ Chicken"));
        assert_eq!(result.structured_content.unwrap()["count"], 2);
    }

    #[test]
    fn empty_listing_is_not_an_error() {
        let result = default_registry()
            .call(&state(), LIST_PIZZAS_TOOL, json!({ "excludeAllergens": ["Gluten"] }))
            .unwrap();
        assert!(!result.is_error());
        assert_eq!(result.structured_content.unwrap()["count"], 0);
    }

    #[test]
    fn add_then_add_again_keeps_one_line() {
        let state = state();
        let registry = default_registry();
        registry
            .call(&state, ADD_TO_CART_TOOL, json!({ "name": "Margherita", "quantity": 2 }))
            .unwrap();
        let result = registry
            .call(&state, ADD_TO_CART_TOOL, json!({ "name": "Margherita", "quantity": 1 }))
            .unwrap();

        let cart = &result.structured_content.unwrap()["cart"];
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert_eq!(cart["items"][0]["quantity"], 3);
        assert_eq!(cart["items"][0]["unitPrice"], 8.0);
        assert_eq!(cart["subtotal"], 24.0);
    }

    #[test]
    fn add_unknown_pizza_is_flagged() {
        let result = default_registry()
            .call(&state(), ADD_TO_CART_TOOL, json!({ "name": "Hawaii" }))
            .unwrap();
        assert!(result.is_error());
        assert!(result.text().contains("Hawaii"));
    }

    #[test]
    fn remove_all_empties_the_cart() {
        let state = state();
        let registry = default_registry();
        registry
            .call(&state, ADD_TO_CART_TOOL, json!({ "name": "Margherita", "quantity": 3 }))
            .unwrap();
        let result = registry
            .call(&state, REMOVE_FROM_CART_TOOL, json!({ "name": "Margherita", "quantity": 3 }))
            .unwrap();
        assert_eq!(result.structured_content.unwrap()["removed"]["status"], "removed");

        let cart = registry.call(&state, GET_CART_TOOL, json!({})).unwrap();
        assert_eq!(cart.text(), "The cart is empty.");
        let snapshot = cart.structured_content.unwrap();
        assert_eq!(snapshot["items"], json!([]));
        assert_eq!(snapshot["subtotal"], 0.0);
    }

    #[test]
    fn remove_missing_line_is_flagged_and_harmless() {
        let state = state();
        let registry = default_registry();
        registry
            .call(&state, ADD_TO_CART_TOOL, json!({ "name": "Margherita" }))
            .unwrap();
        let before = state.cart.snapshot();

        let result = registry
            .call(&state, REMOVE_FROM_CART_TOOL, json!({ "name": "Nonexistent" }))
            .unwrap();
        assert!(result.is_error());
        assert_eq!(state.cart.snapshot(), before);
    }

    #[test]
    fn malformed_arguments_are_tool_errors() {
        let registry = default_registry();
        let state = state();

        let missing_name = registry.call(&state, ADD_TO_CART_TOOL, json!({ "quantity": 1 }));
        assert!(matches!(missing_name, Err(ToolError::InvalidArguments(_))));

        let blank_name = registry.call(&state, ADD_TO_CART_TOOL, json!({ "name": " " }));
        assert!(matches!(blank_name, Err(ToolError::InvalidArguments(_))));

        let bad_quantity =
            registry.call(&state, ADD_TO_CART_TOOL, json!({ "name": "Margherita", "quantity": "two" }));
        assert!(matches!(bad_quantity, Err(ToolError::InvalidArguments(_))));

        assert!(state.cart.snapshot().is_empty());
    }
}
