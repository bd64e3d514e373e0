//! End-to-end tests with all real actors behind the `Tienda` facade.

use actor_framework::mock::FlakyStore;
use actor_framework::MemoryStore;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tienda::availability::AvailabilityWindow;
use tienda::cart_actor::{CartContext, CartError};
use tienda::checkout::{CheckoutError, CheckoutOrchestrator};
use tienda::clients::{CartClient, ProductClient, SolicitudClient};
use tienda::config::ShopConfig;
use tienda::lifecycle::Tienda;
use tienda::model::{
    Category, ProductCreate, ProductId, ProductUpdate, Role, SolicitudStatus, User,
};
use tienda::outcome::{MessageCategory, Notice, TiendaError};
use tienda::solicitud_actor::SolicitudError;

fn seller() -> User {
    User::new(1, "Camila", Role::User)
}

fn buyer() -> User {
    User::new(2, "Diego", Role::User)
}

fn admin() -> User {
    User::new(9, "Admin", Role::Admin)
}

/// June 2024: the 3rd is a Monday, the 9th a Sunday.
fn june(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

async fn add_product(
    tienda: &Tienda,
    name: &str,
    price: u64,
    stock: u32,
    availability: Option<AvailabilityWindow>,
) -> ProductId {
    let category = if availability.is_some() {
        Category::Cancha
    } else {
        Category::Equipamiento
    };
    tienda
        .catalog()
        .create_product(ProductCreate {
            name: name.to_string(),
            price,
            stock,
            category,
            owner_id: seller().id,
            availability,
        })
        .await
        .expect("Failed to create product")
}

async fn stock(tienda: &Tienda, id: ProductId) -> u32 {
    tienda
        .catalog()
        .check_stock(id)
        .await
        .expect("Failed to check stock")
}

async fn all_solicitudes(tienda: &Tienda) -> usize {
    tienda
        .list_all_solicitudes(Some(&admin()))
        .await
        .expect("Failed to list solicitudes")
        .value
        .len()
}

#[tokio::test]
async fn test_solicitud_lifecycle_moves_stock() {
    let tienda = Tienda::new(&ShopConfig::default());
    let product = add_product(&tienda, "Pesas 10kg", 20000, 5, None).await;

    let created = tienda
        .create_solicitud(Some(&buyer()), product, 5, None)
        .await
        .expect("Failed to create solicitud");
    assert_eq!(created.notice, Some(Notice::SolicitudCreated));
    assert_eq!(created.value.status, SolicitudStatus::Pending);
    assert_eq!(stock(&tienda, product).await, 0);

    let approved = tienda
        .approve_solicitud(Some(&seller()), created.value.id)
        .await
        .expect("Failed to approve");
    assert_eq!(approved.value.status, SolicitudStatus::Approved);
    assert_eq!(approved.notice, Some(Notice::SolicitudApproved));
    assert_eq!(stock(&tienda, product).await, 0);

    let deleted = tienda
        .delete_solicitud(Some(&buyer()), created.value.id)
        .await
        .expect("Failed to delete");
    assert_eq!(deleted.notice, Some(Notice::SolicitudDeleted));
    assert_eq!(stock(&tienda, product).await, 5);

    let mine = tienda.list_solicitudes(Some(&buyer())).await.unwrap();
    assert!(mine.value.is_empty());

    tienda.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_delete_restores_reserved_quantity_after_external_change() {
    let tienda = Tienda::new(&ShopConfig::default());
    let product = add_product(&tienda, "Colchoneta", 8000, 10, None).await;

    let created = tienda
        .create_solicitud(Some(&buyer()), product, 3, None)
        .await
        .unwrap();
    assert_eq!(stock(&tienda, product).await, 7);

    tienda
        .catalog()
        .update_product(
            product,
            ProductUpdate {
                stock: Some(20),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    tienda
        .delete_solicitud(Some(&seller()), created.value.id)
        .await
        .unwrap();
    assert_eq!(stock(&tienda, product).await, 23);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reservation_rules_surface_as_messages() {
    let tienda = Tienda::new(&ShopConfig::default());
    let window: AvailabilityWindow = "Wednesday,08:00,Friday,18:00".parse().unwrap();
    let cancha = add_product(&tienda, "Cancha de pádel", 18000, 1, Some(window)).await;

    let missing = tienda
        .create_solicitud(Some(&buyer()), cancha, 1, None)
        .await
        .unwrap_err();
    assert_eq!(
        missing.message(),
        "Debe seleccionar una fecha y hora para la reserva!"
    );

    let early = tienda
        .create_solicitud(Some(&buyer()), cancha, 1, Some(june(5, 7, 0)))
        .await
        .unwrap_err();
    assert_eq!(
        early.message(),
        "No hay reservas disponibles en el día y hora seleccionada!"
    );
    assert_eq!(early.category(), MessageCategory::ValidationError);

    let ok = tienda
        .create_solicitud(Some(&buyer()), cancha, 1, Some(june(5, 12, 0)))
        .await
        .unwrap();
    assert_eq!(
        ok.value.reservation_info.as_deref(),
        Some("Solicitud de reserva para el día 05/06/2024, a las 12:00 hrs")
    );

    let sold_out = tienda
        .create_solicitud(Some(&buyer()), cancha, 1, Some(june(6, 12, 0)))
        .await
        .unwrap_err();
    assert_eq!(
        sold_out.message(),
        "No hay suficiente stock para realizar la solicitud!"
    );

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_creates_one_solicitud_per_line() {
    let tienda = Tienda::new(&ShopConfig::default());
    let window: AvailabilityWindow = "Friday,10:00,Monday,22:00".parse().unwrap();
    let balon = add_product(&tienda, "Balón", 4000, 10, None).await;
    let cancha = add_product(&tienda, "Cancha de fútbol", 25000, 1, Some(window)).await;
    let diego = buyer();

    tienda.add_to_cart(Some(&diego), balon, 2).await.unwrap();
    tienda.add_to_cart(Some(&diego), cancha, 1).await.unwrap();

    let sunday = june(9, 11, 0);
    let reservations = HashMap::from([(cancha, sunday)]);
    let outcome = tienda
        .checkout(Some(&diego), &reservations)
        .await
        .expect("Checkout failed");

    assert_eq!(outcome.notice, Some(Notice::CheckoutCompleted));
    assert_eq!(outcome.value.len(), 2);
    assert!(outcome.value.iter().all(|s| s.is_pending() && s.user_id == diego.id));
    let reserved = outcome
        .value
        .iter()
        .find(|s| s.product_id == cancha)
        .unwrap();
    assert_eq!(reserved.reservation_datetime, Some(sunday));

    assert_eq!(stock(&tienda, balon).await, 8);
    assert_eq!(stock(&tienda, cancha).await, 0);
    assert!(tienda.cart(Some(&diego)).await.unwrap().value.is_empty());

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_is_atomic_when_stock_is_short() {
    let tienda = Tienda::new(&ShopConfig::default());
    let guantes = add_product(&tienda, "Guantes", 9000, 5, None).await;
    let rodilleras = add_product(&tienda, "Rodilleras", 7000, 2, None).await;
    let diego = buyer();

    tienda.add_to_cart(Some(&diego), guantes, 2).await.unwrap();
    tienda.add_to_cart(Some(&diego), rodilleras, 2).await.unwrap();

    // Someone else bought a pair in the meantime.
    tienda
        .catalog()
        .update_product(
            rodilleras,
            ProductUpdate {
                stock: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let error = tienda
        .checkout(Some(&diego), &HashMap::new())
        .await
        .unwrap_err();
    assert_eq!(
        error,
        TiendaError::Checkout(CheckoutError::InsufficientProductStock {
            product: "Rodilleras".into(),
            requested: 2,
            available: 1,
        })
    );

    assert_eq!(all_solicitudes(&tienda).await, 0);
    assert_eq!(stock(&tienda, guantes).await, 5);
    assert_eq!(stock(&tienda, rodilleras).await, 1);
    assert_eq!(tienda.cart(Some(&diego)).await.unwrap().value.len(), 2);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_rolls_back_created_solicitudes() {
    let tienda = Tienda::new(&ShopConfig::default());
    let window: AvailabilityWindow = "Friday,10:00,Monday,22:00".parse().unwrap();
    // Lines are processed in product order, so the ball is created first.
    let balon = add_product(&tienda, "Balón", 4000, 10, None).await;
    let cancha = add_product(&tienda, "Cancha de fútbol", 25000, 1, Some(window)).await;
    let diego = buyer();

    tienda.add_to_cart(Some(&diego), balon, 3).await.unwrap();
    tienda.add_to_cart(Some(&diego), cancha, 1).await.unwrap();

    let error = tienda
        .checkout(Some(&diego), &HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        TiendaError::Checkout(CheckoutError::Solicitud {
            source: SolicitudError::ReservationRequired(_),
            ..
        })
    ));

    assert_eq!(all_solicitudes(&tienda).await, 0);
    assert_eq!(stock(&tienda, balon).await, 10);
    assert_eq!(stock(&tienda, cancha).await, 1);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_full_only_blocks_new_products() {
    let tienda = Tienda::new(&ShopConfig::default());
    let diego = buyer();

    let mut products = Vec::new();
    for i in 0..9 {
        products.push(add_product(&tienda, &format!("Producto {i}"), 1000, 10, None).await);
    }
    for &product in &products[..8] {
        tienda.add_to_cart(Some(&diego), product, 1).await.unwrap();
    }

    let ninth = tienda
        .add_to_cart(Some(&diego), products[8], 1)
        .await
        .unwrap_err();
    assert_eq!(ninth, TiendaError::Cart(CartError::CartFull { max: 8 }));

    let bumped = tienda
        .add_to_cart(Some(&diego), products[0], 4)
        .await
        .unwrap();
    assert_eq!(bumped.value.quantity_of(products[0]), Some(5));
    assert_eq!(bumped.value.len(), 8);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_quantity_cap_and_stock_check() {
    let tienda = Tienda::new(&ShopConfig::default());
    let product = add_product(&tienda, "Proteína", 30000, 500, None).await;
    let scarce = add_product(&tienda, "Creatina", 15000, 2, None).await;
    let diego = buyer();

    tienda.add_to_cart(Some(&diego), product, 100).await.unwrap();
    let over = tienda
        .add_to_cart(Some(&diego), product, 1)
        .await
        .unwrap_err();
    assert_eq!(
        over,
        TiendaError::Cart(CartError::QuantityExceeded {
            product: "Proteína".into(),
            requested: 101,
            max: 100,
        })
    );

    let short = tienda
        .add_to_cart(Some(&diego), scarce, 3)
        .await
        .unwrap_err();
    assert!(matches!(
        short,
        TiendaError::Cart(CartError::InsufficientStock { available: 2, .. })
    ));

    let missing = tienda
        .remove_from_cart(Some(&diego), scarce)
        .await
        .unwrap_err();
    assert_eq!(
        missing.message(),
        "El producto no existe en el carro de compras"
    );

    let removed = tienda
        .remove_from_cart(Some(&diego), product)
        .await
        .unwrap();
    assert_eq!(removed.notice, Some(Notice::CartItemRemoved));
    assert!(removed.value.is_empty());

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_totals_and_shipping() {
    let tienda = Tienda::new(&ShopConfig::default());
    let product = add_product(&tienda, "Raqueta", 4000, 5, None).await;
    let diego = buyer();

    let empty = tienda.cart_totals(Some(&diego)).await.unwrap().value;
    assert_eq!(empty.subtotal, 0);
    assert_eq!(empty.shipping, 1000);
    assert_eq!(empty.total, 1000);

    tienda.add_to_cart(Some(&diego), product, 1).await.unwrap();
    let one = tienda.cart_totals(Some(&diego)).await.unwrap().value;
    assert_eq!(one.subtotal, 4000);
    assert_eq!(one.shipping, 1200);
    assert_eq!(one.total, 5200);

    let cleared = tienda.clear_cart(Some(&diego)).await.unwrap();
    assert_eq!(cleared.notice, Some(Notice::CartCleared));
    assert!(cleared.value.is_empty());

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_requests_never_oversell() {
    let tienda = Arc::new(Tienda::new(&ShopConfig::default()));
    let product = add_product(&tienda, "Bicicleta estática", 150000, 5, None).await;

    let mut handles = Vec::new();
    for i in 0..12u32 {
        let tienda = tienda.clone();
        handles.push(tokio::spawn(async move {
            let user = User::new(100 + i, format!("Cliente {i}"), Role::User);
            tienda.create_solicitud(Some(&user), product, 1, None).await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(e) => assert!(matches!(
                e,
                TiendaError::Solicitud(SolicitudError::InsufficientStock { .. })
            )),
        }
    }

    assert_eq!(accepted, 5);
    assert_eq!(stock(&tienda, product).await, 0);
    assert_eq!(all_solicitudes(&tienda).await, 5);

    let tienda = Arc::try_unwrap(tienda).ok().expect("Tienda still shared");
    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_authorization_is_checked_once_per_operation() {
    let tienda = Tienda::new(&ShopConfig::default());
    let product = add_product(&tienda, "Mancuernas", 12000, 5, None).await;
    let stranger = User::new(3, "Otro", Role::User);

    let anonymous = tienda
        .create_solicitud(None, product, 1, None)
        .await
        .unwrap_err();
    assert_eq!(anonymous, TiendaError::NotAuthenticated);

    let own = tienda
        .create_solicitud(Some(&seller()), product, 1, None)
        .await
        .unwrap_err();
    assert_eq!(own, TiendaError::NotAuthorized);
    assert_eq!(own.category(), MessageCategory::AuthorizationError);

    let created = tienda
        .create_solicitud(Some(&buyer()), product, 1, None)
        .await
        .unwrap()
        .value;

    for user in [buyer(), stranger.clone()] {
        assert_eq!(
            tienda.approve_solicitud(Some(&user), created.id).await,
            Err(TiendaError::NotAuthorized)
        );
    }
    assert_eq!(
        tienda.delete_solicitud(Some(&stranger), created.id).await,
        Err(TiendaError::NotAuthorized)
    );
    assert_eq!(
        tienda.list_all_solicitudes(Some(&buyer())).await,
        Err(TiendaError::NotAuthorized)
    );
    assert_eq!(all_solicitudes(&tienda).await, 1);

    tienda
        .approve_solicitud(Some(&admin()), created.id)
        .await
        .unwrap();

    let no_user = tienda.checkout(None, &HashMap::new()).await.unwrap_err();
    assert_eq!(no_user.message(), "Debes iniciar sesión para comprar.");

    let empty = tienda
        .checkout(Some(&stranger), &HashMap::new())
        .await
        .unwrap_err();
    assert_eq!(empty.message(), "No tienes productos que comprar.");

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_solicitud_save_keeps_stock() {
    let (solicitud_store, faults) = FlakyStore::new();
    let tienda = Tienda::with_stores(
        &ShopConfig::default(),
        MemoryStore::new(),
        solicitud_store,
        MemoryStore::new(),
    );
    let product = add_product(&tienda, "Cuerda", 3000, 4, None).await;

    faults.fail_saves(true);
    let error = tienda
        .create_solicitud(Some(&buyer()), product, 3, None)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        TiendaError::Solicitud(SolicitudError::PersistenceFailed(_))
    ));
    assert_eq!(error.message(), "Hubo un error al guardar la solicitud!");
    assert_eq!(stock(&tienda, product).await, 4);
    assert_eq!(all_solicitudes(&tienda).await, 0);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_approval_keeps_pending() {
    let (solicitud_store, faults) = FlakyStore::new();
    let tienda = Tienda::with_stores(
        &ShopConfig::default(),
        MemoryStore::new(),
        solicitud_store,
        MemoryStore::new(),
    );
    let product = add_product(&tienda, "Cuerda", 3000, 4, None).await;
    let created = tienda
        .create_solicitud(Some(&buyer()), product, 1, None)
        .await
        .unwrap()
        .value;

    faults.fail_saves(true);
    let error = tienda
        .approve_solicitud(Some(&seller()), created.id)
        .await
        .unwrap_err();
    assert_eq!(error.message(), "Hubo un error al aprobar la solicitud!");

    let mine = tienda.list_solicitudes(Some(&buyer())).await.unwrap().value;
    assert_eq!(mine[0].status, SolicitudStatus::Pending);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_delete_keeps_solicitud_and_stock() {
    let (solicitud_store, faults) = FlakyStore::new();
    let tienda = Tienda::with_stores(
        &ShopConfig::default(),
        MemoryStore::new(),
        solicitud_store,
        MemoryStore::new(),
    );
    let product = add_product(&tienda, "Cuerda", 3000, 4, None).await;
    let created = tienda
        .create_solicitud(Some(&buyer()), product, 2, None)
        .await
        .unwrap()
        .value;

    faults.fail_removes(true);
    let error = tienda
        .delete_solicitud(Some(&buyer()), created.id)
        .await
        .unwrap_err();

    assert_eq!(error.message(), "Hubo un error al eliminar la solicitud!");
    assert_eq!(stock(&tienda, product).await, 2);
    assert_eq!(all_solicitudes(&tienda).await, 1);

    faults.heal();
    tienda
        .delete_solicitud(Some(&buyer()), created.id)
        .await
        .unwrap();
    assert_eq!(stock(&tienda, product).await, 4);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_rolls_back_when_a_save_fails_midway() {
    let (solicitud_store, faults) = FlakyStore::new();
    let tienda = Tienda::with_stores(
        &ShopConfig::default(),
        MemoryStore::new(),
        solicitud_store,
        MemoryStore::new(),
    );
    let a = add_product(&tienda, "Casco", 20000, 3, None).await;
    let b = add_product(&tienda, "Rodilleras", 7000, 3, None).await;
    let diego = buyer();
    tienda.add_to_cart(Some(&diego), a, 1).await.unwrap();
    tienda.add_to_cart(Some(&diego), b, 2).await.unwrap();

    faults.fail_saves_after(1);
    let error = tienda
        .checkout(Some(&diego), &HashMap::new())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        TiendaError::Checkout(CheckoutError::Solicitud {
            source: SolicitudError::PersistenceFailed(_),
            ..
        })
    ));
    assert_eq!(all_solicitudes(&tienda).await, 0);
    assert_eq!(stock(&tienda, a).await, 3);
    assert_eq!(stock(&tienda, b).await, 3);
    assert_eq!(tienda.cart(Some(&diego)).await.unwrap().value.len(), 2);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_rolls_back_when_cart_cannot_be_cleared() {
    let (cart_store, faults) = FlakyStore::new();
    let tienda = Tienda::with_stores(
        &ShopConfig::default(),
        MemoryStore::new(),
        MemoryStore::new(),
        cart_store,
    );
    let a = add_product(&tienda, "Casco", 20000, 3, None).await;
    let diego = buyer();
    tienda.add_to_cart(Some(&diego), a, 2).await.unwrap();

    faults.fail_saves(true);
    let error = tienda
        .checkout(Some(&diego), &HashMap::new())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        TiendaError::Checkout(CheckoutError::Cart(CartError::PersistenceFailed(_)))
    ));
    assert_eq!(all_solicitudes(&tienda).await, 0);
    assert_eq!(stock(&tienda, a).await, 3);

    faults.heal();
    assert_eq!(tienda.cart(Some(&diego)).await.unwrap().value.len(), 1);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_refuses_the_owners_own_products() {
    let tienda = Tienda::new(&ShopConfig::default());
    let balon = add_product(&tienda, "Balón", 4000, 10, None).await;
    let camila = seller();

    let direct = tienda.create_solicitud(Some(&camila), balon, 1, None).await;
    assert_eq!(direct.unwrap_err(), TiendaError::NotAuthorized);

    tienda.add_to_cart(Some(&camila), balon, 2).await.unwrap();
    let error = tienda
        .checkout(Some(&camila), &HashMap::new())
        .await
        .unwrap_err();

    assert_eq!(error, TiendaError::NotAuthorized);
    assert_eq!(error.category(), MessageCategory::AuthorizationError);
    assert_eq!(stock(&tienda, balon).await, 10);
    assert_eq!(all_solicitudes(&tienda).await, 0);
    assert_eq!(tienda.cart(Some(&camila)).await.unwrap().value.len(), 1);

    tienda.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_leaves_items_added_after_the_cart_was_read() {
    let (product_actor, product_client) = tienda::product_actor::new(10);
    let (solicitud_actor, solicitud_client) = tienda::solicitud_actor::new(10);
    let (cart_actor, cart_client) = tienda::cart_actor::new(10);
    let products = ProductClient::new(product_client);
    let solicitudes = SolicitudClient::new(solicitud_client);
    let carts = CartClient::new(cart_client);
    tokio::spawn(product_actor.run(()));
    tokio::spawn(solicitud_actor.run(products.clone()));
    tokio::spawn(cart_actor.run(CartContext {
        products: products.clone(),
        limits: ShopConfig::default().cart,
    }));
    let checkout = CheckoutOrchestrator::new(products.clone(), solicitudes.clone(), carts.clone());

    let mut ids = Vec::new();
    for name in ["Pelota", "Red"] {
        let id = products
            .create_product(ProductCreate {
                name: name.to_string(),
                price: 5000,
                stock: 5,
                category: Category::Equipamiento,
                owner_id: seller().id,
                availability: None,
            })
            .await
            .unwrap();
        ids.push(id);
    }
    let (pelota, red) = (ids[0], ids[1]);
    let diego = buyer();

    carts.add_item(diego.id, pelota, 2).await.unwrap();
    let snapshot = carts.cart(diego.id).await.unwrap();

    // Both land after the snapshot was taken.
    carts.add_item(diego.id, red, 3).await.unwrap();
    carts.add_item(diego.id, pelota, 1).await.unwrap();

    let created = checkout
        .checkout(&snapshot, Some(&diego), &HashMap::new())
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!((created[0].product_id, created[0].quantity), (pelota, 2));

    let left = carts.cart(diego.id).await.unwrap();
    assert_eq!(left.lines, BTreeMap::from([(pelota, 1), (red, 3)]));
    assert_eq!(products.check_stock(pelota).await.unwrap(), 3);
    assert_eq!(products.check_stock(red).await.unwrap(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_during_checkout_is_never_lost() {
    let tienda = Arc::new(Tienda::new(&ShopConfig::default()));
    let raqueta = add_product(&tienda, "Raqueta", 30000, 1000, None).await;
    let pelotas = add_product(&tienda, "Pelotas", 3000, 1000, None).await;

    for i in 0..50u32 {
        let user = User::new(200 + i, format!("Cliente {i}"), Role::User);
        tienda.add_to_cart(Some(&user), raqueta, 1).await.unwrap();

        let checkout = {
            let (tienda, user) = (tienda.clone(), user.clone());
            tokio::spawn(async move { tienda.checkout(Some(&user), &HashMap::new()).await })
        };
        let add = {
            let (tienda, user) = (tienda.clone(), user.clone());
            tokio::spawn(async move { tienda.add_to_cart(Some(&user), pelotas, 1).await })
        };
        checkout.await.unwrap().unwrap();
        add.await.unwrap().unwrap();

        let in_cart = tienda
            .cart(Some(&user))
            .await
            .unwrap()
            .value
            .quantity_of(pelotas)
            .is_some();
        let requested = tienda
            .list_solicitudes(Some(&user))
            .await
            .unwrap()
            .value
            .iter()
            .any(|s| s.product_id == pelotas);
        assert!(in_cart != requested, "round {i}: in cart {in_cart}, requested {requested}");
    }

    let tienda = Arc::try_unwrap(tienda).ok().expect("Tienda still shared");
    tienda.shutdown().await.unwrap();
}
