//! # Authorization
//!
//! One capability check for every operation the shop exposes. The facade calls
//! [`can`] once before dispatching to an actor; actors never look at roles.
//!
//! | Permission | Resource | Allowed for |
//! |------------|----------|-------------|
//! | `Create` | product | anyone but the product's owner |
//! | `View`, `Delete` | solicitud | its requester or the product's owner |
//! | `Approve` | solicitud | the product's owner |
//! | any | cart | the cart's owner |
//! | `List` | all solicitudes | nobody (admins only) |
//!
//! Admins may do everything. Anonymous callers may do nothing.

use crate::model::{Product, Solicitud, User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Create,
    View,
    Approve,
    Delete,
    List,
    Checkout,
}

/// What a permission is checked against.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// A product someone wants to request.
    Product(&'a Product),
    /// An existing solicitud together with the owner of the product it is for.
    Solicitud {
        solicitud: &'a Solicitud,
        product_owner: UserId,
    },
    /// The cart belonging to the given user.
    Cart(UserId),
    /// Every solicitud in the shop.
    AllSolicitudes,
}

/// Whether `actor` may perform `permission` on `resource`.
pub fn can(permission: Permission, resource: &Resource<'_>, actor: Option<&User>) -> bool {
    let Some(actor) = actor else {
        return false;
    };
    if actor.is_admin() {
        return true;
    }

    match (permission, resource) {
        (Permission::Create, Resource::Product(product)) => product.owner_id != actor.id,
        (
            Permission::View | Permission::Delete,
            Resource::Solicitud {
                solicitud,
                product_owner,
            },
        ) => solicitud.user_id == actor.id || *product_owner == actor.id,
        (Permission::Approve, Resource::Solicitud { product_owner, .. }) => {
            *product_owner == actor.id
        }
        (_, Resource::Cart(owner)) => *owner == actor.id,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ProductCreate, ProductId, Role, SolicitudCreate, SolicitudId};

    fn product(owner: u32) -> Product {
        Product::new(
            ProductId(1),
            ProductCreate {
                name: "Cancha de pádel".into(),
                price: 12000,
                stock: 3,
                category: Category::Cancha,
                owner_id: UserId(owner),
                availability: None,
            },
        )
    }

    fn solicitud(requester: u32) -> Solicitud {
        Solicitud::new(
            SolicitudId(1),
            SolicitudCreate::purchase(ProductId(1), UserId(requester), 1),
        )
    }

    #[test]
    fn test_anonymous_can_do_nothing() {
        let p = product(1);
        assert!(!can(Permission::Create, &Resource::Product(&p), None));
        assert!(!can(Permission::View, &Resource::Cart(UserId(1)), None));
    }

    #[test]
    fn test_admin_can_do_everything() {
        let admin = User::new(9, "Admin", Role::Admin);
        let p = product(9);
        let s = solicitud(2);
        let on_s = Resource::Solicitud {
            solicitud: &s,
            product_owner: UserId(1),
        };
        assert!(can(Permission::Create, &Resource::Product(&p), Some(&admin)));
        assert!(can(Permission::Approve, &on_s, Some(&admin)));
        assert!(can(Permission::Delete, &on_s, Some(&admin)));
        assert!(can(Permission::List, &Resource::AllSolicitudes, Some(&admin)));
        assert!(can(Permission::View, &Resource::Cart(UserId(2)), Some(&admin)));
    }

    #[test]
    fn test_owner_cannot_request_own_product() {
        let owner = User::new(1, "Dueña", Role::User);
        let buyer = User::new(2, "Cliente", Role::User);
        let p = product(1);
        assert!(!can(Permission::Create, &Resource::Product(&p), Some(&owner)));
        assert!(can(Permission::Create, &Resource::Product(&p), Some(&buyer)));
    }

    #[test]
    fn test_solicitud_rules() {
        let owner = User::new(1, "Dueña", Role::User);
        let requester = User::new(2, "Cliente", Role::User);
        let stranger = User::new(3, "Otro", Role::User);
        let s = solicitud(2);
        let on_s = Resource::Solicitud {
            solicitud: &s,
            product_owner: owner.id,
        };

        for user in [&owner, &requester] {
            assert!(can(Permission::View, &on_s, Some(user)));
            assert!(can(Permission::Delete, &on_s, Some(user)));
        }
        assert!(!can(Permission::View, &on_s, Some(&stranger)));
        assert!(!can(Permission::Delete, &on_s, Some(&stranger)));

        assert!(can(Permission::Approve, &on_s, Some(&owner)));
        assert!(!can(Permission::Approve, &on_s, Some(&requester)));
    }

    #[test]
    fn test_cart_is_owner_only() {
        let user = User::new(2, "Cliente", Role::User);
        assert!(can(Permission::Checkout, &Resource::Cart(UserId(2)), Some(&user)));
        assert!(can(Permission::Delete, &Resource::Cart(UserId(2)), Some(&user)));
        assert!(!can(Permission::View, &Resource::Cart(UserId(3)), Some(&user)));
    }

    #[test]
    fn test_listing_everything_is_admin_only() {
        let user = User::new(2, "Cliente", Role::User);
        assert!(!can(Permission::List, &Resource::AllSolicitudes, Some(&user)));
    }
}
