use crate::authz::{can, Permission, Resource};
use crate::cart_actor::CartContext;
use crate::checkout::{CheckoutError, CheckoutOrchestrator};
use crate::clients::{CartClient, ProductClient, SolicitudClient};
use crate::config::ShopConfig;
use crate::model::{Cart, Product, ProductId, Solicitud, SolicitudCreate, SolicitudId, User};
use crate::outcome::{Notice, Outcome, TiendaError};
use crate::pricing::CartTotals;
use crate::solicitud_actor::SolicitudError;
use actor_framework::{ActorClient, EntityStore, MemoryStore};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

/// The shop's runtime: owns the product, solicitud and cart actors and exposes the
/// operations the presentation layer calls.
///
/// `Tienda` is responsible for:
/// - **Lifecycle Management**: starting the actors and stopping them on shutdown
/// - **Dependency Wiring**: the solicitud and cart actors both talk to the product actor
/// - **Authorization**: every operation is checked once with [`can`] before it is dispatched
///
/// Every operation takes the caller explicitly (`None` for an anonymous visitor) and
/// returns an [`Outcome`] or a [`TiendaError`]; nothing is reported by panicking.
///
/// # Example
///
/// ```ignore
/// let tienda = Tienda::new(&ShopConfig::default());
///
/// let id = tienda.catalog().create_product(cancha).await?;
/// tienda.add_to_cart(Some(&user), id, 1).await?;
/// let created = tienda.checkout(Some(&user), &reservations).await?;
///
/// tienda.shutdown().await?;
/// ```
pub struct Tienda {
    products: ProductClient,
    solicitudes: SolicitudClient,
    carts: CartClient,
    checkout: CheckoutOrchestrator,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Tienda {
    /// Starts the shop with in-memory storage.
    pub fn new(config: &ShopConfig) -> Self {
        Self::with_stores(config, MemoryStore::new(), MemoryStore::new(), MemoryStore::new())
    }

    /// Starts the shop on top of the given stores.
    pub fn with_stores<P, S, C>(config: &ShopConfig, products: P, solicitudes: S, carts: C) -> Self
    where
        P: EntityStore<Product>,
        S: EntityStore<Solicitud>,
        C: EntityStore<Cart>,
    {
        let buffer = config.actor_buffer;

        // 1. Create actors (no dependencies yet)
        let (product_actor, product_client) = crate::product_actor::with_store(buffer, products);
        let (solicitud_actor, solicitud_client) =
            crate::solicitud_actor::with_store(buffer, solicitudes);
        let (cart_actor, cart_client) = crate::cart_actor::with_store(buffer, carts);

        let products = ProductClient::new(product_client);
        let solicitudes = SolicitudClient::new(solicitud_client);
        let carts = CartClient::new(cart_client);

        // 2. Start actors with injected context
        let product_handle = tokio::spawn(product_actor.run(()));
        let solicitud_handle = tokio::spawn(solicitud_actor.run(products.clone()));
        let cart_handle = tokio::spawn(cart_actor.run(CartContext {
            products: products.clone(),
            limits: config.cart,
        }));

        let checkout =
            CheckoutOrchestrator::new(products.clone(), solicitudes.clone(), carts.clone());

        Self {
            products,
            solicitudes,
            carts,
            checkout,
            handles: vec![product_handle, solicitud_handle, cart_handle],
        }
    }

    /// The product catalog. Catalog management is not authorized here.
    pub fn catalog(&self) -> &ProductClient {
        &self.products
    }

    fn authorize<'a>(
        user: Option<&'a User>,
        permission: Permission,
        resource: Resource<'_>,
    ) -> Result<&'a User, TiendaError> {
        let actor = user.ok_or(TiendaError::NotAuthenticated)?;
        if can(permission, &resource, Some(actor)) {
            Ok(actor)
        } else {
            warn!(user_id = %actor.id, ?permission, "Not authorized");
            Err(TiendaError::NotAuthorized)
        }
    }

    /// Loads a solicitud and checks `permission` against it.
    async fn authorized_solicitud(
        &self,
        user: Option<&User>,
        permission: Permission,
        id: SolicitudId,
    ) -> Result<Solicitud, TiendaError> {
        if user.is_none() {
            return Err(TiendaError::NotAuthenticated);
        }
        let solicitud = self
            .solicitudes
            .get(id)
            .await?
            .ok_or_else(|| SolicitudError::NotFound(id.to_string()))?;
        let product = self.products.product(solicitud.product_id).await?;
        Self::authorize(
            user,
            permission,
            Resource::Solicitud {
                solicitud: &solicitud,
                product_owner: product.owner_id,
            },
        )?;
        Ok(solicitud)
    }

    /// The caller's own solicitudes.
    #[instrument(skip(self, user))]
    pub async fn list_solicitudes(
        &self,
        user: Option<&User>,
    ) -> Result<Outcome<Vec<Solicitud>>, TiendaError> {
        let user = user.ok_or(TiendaError::NotAuthenticated)?;
        let list = self.solicitudes.list_for_user(user.id).await?;
        Ok(Outcome::quiet(list))
    }

    /// Every solicitud in the shop.
    #[instrument(skip(self, user))]
    pub async fn list_all_solicitudes(
        &self,
        user: Option<&User>,
    ) -> Result<Outcome<Vec<Solicitud>>, TiendaError> {
        Self::authorize(user, Permission::List, Resource::AllSolicitudes)?;
        let list = self.solicitudes.list_all().await?;
        Ok(Outcome::quiet(list))
    }

    /// Requests `quantity` units of a product. `reservation` is required when the
    /// product has an availability window.
    #[instrument(skip(self, user))]
    pub async fn create_solicitud(
        &self,
        user: Option<&User>,
        product_id: ProductId,
        quantity: u32,
        reservation: Option<NaiveDateTime>,
    ) -> Result<Outcome<Solicitud>, TiendaError> {
        if user.is_none() {
            return Err(TiendaError::NotAuthenticated);
        }
        let product = self.products.product(product_id).await?;
        let user = Self::authorize(user, Permission::Create, Resource::Product(&product))?;

        let id = self
            .solicitudes
            .create_solicitud(SolicitudCreate {
                product_id,
                user_id: user.id,
                quantity,
                reservation,
            })
            .await?;
        let solicitud = self
            .solicitudes
            .get(id)
            .await?
            .ok_or_else(|| SolicitudError::NotFound(id.to_string()))?;

        info!(%id, %product_id, quantity, "Solicitud created");
        Ok(Outcome::with_notice(solicitud, Notice::SolicitudCreated))
    }

    #[instrument(skip(self, user))]
    pub async fn approve_solicitud(
        &self,
        user: Option<&User>,
        id: SolicitudId,
    ) -> Result<Outcome<Solicitud>, TiendaError> {
        self.authorized_solicitud(user, Permission::Approve, id)
            .await?;
        let solicitud = self.solicitudes.approve(id).await?;
        info!(%id, "Solicitud approved");
        Ok(Outcome::with_notice(solicitud, Notice::SolicitudApproved))
    }

    /// Deletes a solicitud and returns its stock to the product.
    #[instrument(skip(self, user))]
    pub async fn delete_solicitud(
        &self,
        user: Option<&User>,
        id: SolicitudId,
    ) -> Result<Outcome<()>, TiendaError> {
        self.authorized_solicitud(user, Permission::Delete, id)
            .await?;
        self.solicitudes.delete_solicitud(id).await?;
        info!(%id, "Solicitud deleted");
        Ok(Outcome::with_notice((), Notice::SolicitudDeleted))
    }

    /// The caller's cart, created empty on first use.
    #[instrument(skip(self, user))]
    pub async fn cart(&self, user: Option<&User>) -> Result<Outcome<Cart>, TiendaError> {
        let user = Self::authorize_cart(user, Permission::View)?;
        Ok(Outcome::quiet(self.carts.cart(user.id).await?))
    }

    #[instrument(skip(self, user))]
    pub async fn add_to_cart(
        &self,
        user: Option<&User>,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Outcome<Cart>, TiendaError> {
        let user = Self::authorize_cart(user, Permission::Create)?;
        let cart = self.carts.add_item(user.id, product_id, quantity).await?;
        Ok(Outcome::with_notice(cart, Notice::CartItemAdded))
    }

    #[instrument(skip(self, user))]
    pub async fn remove_from_cart(
        &self,
        user: Option<&User>,
        product_id: ProductId,
    ) -> Result<Outcome<Cart>, TiendaError> {
        let user = Self::authorize_cart(user, Permission::Delete)?;
        let cart = self.carts.remove_item(user.id, product_id).await?;
        Ok(Outcome::with_notice(cart, Notice::CartItemRemoved))
    }

    #[instrument(skip(self, user))]
    pub async fn clear_cart(&self, user: Option<&User>) -> Result<Outcome<Cart>, TiendaError> {
        let user = Self::authorize_cart(user, Permission::Delete)?;
        let cart = self.carts.clear(user.id).await?;
        Ok(Outcome::with_notice(cart, Notice::CartCleared))
    }

    #[instrument(skip(self, user))]
    pub async fn cart_totals(
        &self,
        user: Option<&User>,
    ) -> Result<Outcome<CartTotals>, TiendaError> {
        let user = Self::authorize_cart(user, Permission::View)?;
        Ok(Outcome::quiet(self.carts.totals(user.id).await?))
    }

    /// Turns the caller's cart into pending solicitudes, all or nothing.
    ///
    /// `reservations` maps products that need a reservation time to the requested
    /// date and time. Every line is checked like [`Tienda::create_solicitud`]
    /// before anything is written, so nobody checks out their own product.
    #[instrument(skip(self, user, reservations))]
    pub async fn checkout(
        &self,
        user: Option<&User>,
        reservations: &HashMap<ProductId, NaiveDateTime>,
    ) -> Result<Outcome<Vec<Solicitud>>, TiendaError> {
        let Some(user) = user else {
            return Err(CheckoutError::NotAuthenticated.into());
        };
        let user = Self::authorize_cart(Some(user), Permission::Checkout)?;
        let cart = self.carts.cart(user.id).await?;
        for &product_id in cart.lines.keys() {
            let product = self
                .products
                .product(product_id)
                .await
                .map_err(CheckoutError::from)?;
            Self::authorize(Some(user), Permission::Create, Resource::Product(&product))?;
        }
        let created = self
            .checkout
            .checkout(&cart, Some(user), reservations)
            .await?;
        Ok(Outcome::with_notice(created, Notice::CheckoutCompleted))
    }

    fn authorize_cart(user: Option<&User>, permission: Permission) -> Result<&User, TiendaError> {
        let owner = user.ok_or(TiendaError::NotAuthenticated)?.id;
        Self::authorize(user, permission, Resource::Cart(owner))
    }

    /// Gracefully shuts down every actor.
    ///
    /// Dropping the clients closes the actors' mailboxes; each actor then leaves its
    /// loop. The solicitud and cart actors hold product clients of their own, so the
    /// product actor stops only after both of them are gone.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop...");

        drop(self.checkout);
        drop(self.carts);
        drop(self.solicitudes);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Shop shutdown complete.");
        Ok(())
    }
}
