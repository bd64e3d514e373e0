//! [`ActorEntity`] implementation for [`Cart`].

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use super::CartContext;
use crate::model::{Cart, CartCreate, ProductId, UserId};
use crate::pricing::{self, PricedLine};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::collections::BTreeMap;

impl Cart {
    async fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        ctx: &CartContext,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let product = ctx.products.product(product_id).await?;
        if quantity > product.stock {
            return Err(CartError::InsufficientStock {
                product: product.name,
                requested: quantity,
                available: product.stock,
            });
        }

        let current = self.quantity_of(product_id);
        let summed = current.unwrap_or(0).saturating_add(quantity);
        if summed > ctx.limits.max_quantity {
            return Err(CartError::QuantityExceeded {
                product: product.name,
                requested: summed,
                max: ctx.limits.max_quantity,
            });
        }
        if current.is_none() && self.lines.len() >= ctx.limits.max_lines {
            return Err(CartError::CartFull {
                max: ctx.limits.max_lines,
            });
        }

        self.lines.insert(product_id, summed);
        Ok(())
    }

    fn remove_lines(&mut self, lines: BTreeMap<ProductId, u32>) {
        for (product_id, quantity) in lines {
            match self.quantity_of(product_id) {
                Some(current) if current > quantity => {
                    self.lines.insert(product_id, current - quantity);
                }
                Some(_) => {
                    self.lines.remove(&product_id);
                }
                None => {}
            }
        }
    }

    async fn priced_lines(&self, ctx: &CartContext) -> Result<Vec<PricedLine>, CartError> {
        let mut lines = Vec::with_capacity(self.lines.len());
        for (&product_id, &quantity) in &self.lines {
            let product = ctx.products.product(product_id).await?;
            lines.push(PricedLine {
                price: product.price,
                quantity,
            });
        }
        Ok(lines)
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(user_id: UserId, _params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(user_id))
    }

    fn is_read_only(&self, action: &CartAction) -> bool {
        matches!(action, CartAction::Totals)
    }

    async fn on_update(&mut self, _update: (), _ctx: &CartContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartActionResult, Self::Error> {
        match action {
            CartAction::AddItem {
                product_id,
                quantity,
            } => self.add_item(product_id, quantity, ctx).await?,
            CartAction::RemoveItem(product_id) => {
                if self.lines.remove(&product_id).is_none() {
                    return Err(CartError::ItemNotFound(product_id.to_string()));
                }
            }
            CartAction::Clear => self.lines.clear(),
            CartAction::RemoveLines(lines) => self.remove_lines(lines),
            CartAction::Totals => {
                let lines = self.priced_lines(ctx).await?;
                return Ok(CartActionResult::Totals(pricing::totals(&lines, &ctx.limits)));
            }
        }
        Ok(CartActionResult::Updated(self.clone()))
    }
}
