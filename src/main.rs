//! Demo run of the shop core: a seller lists a court and a ball, a customer fills a
//! cart, checks out with a reservation, and the seller approves one request and
//! deletes the other.

use chrono::NaiveDate;
use std::collections::HashMap;
use tienda::availability::AvailabilityWindow;
use tienda::config::ShopConfig;
use tienda::lifecycle::{setup_tracing, Tienda};
use tienda::model::{Category, ProductCreate, Role, User};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ShopConfig::load().unwrap_or_else(|e| {
        eprintln!("Invalid configuration, using defaults: {e}");
        ShopConfig::default()
    });
    if let Err(e) = setup_tracing(&config.logging) {
        eprintln!("Tracing already initialised: {e}");
    }

    info!(?config, "Starting shop");
    let tienda = Tienda::new(&config);

    let seller = User::new(1, "Camila", Role::User);
    let customer = User::new(2, "Diego", Role::User);

    let window: AvailabilityWindow = "Friday,10:00,Monday,22:00"
        .parse()
        .map_err(|e| format!("{e}"))?;

    let span = tracing::info_span!("catalog_seeding");
    let (cancha, balon) = async {
        let cancha = tienda
            .catalog()
            .create_product(ProductCreate {
                name: "Cancha de fútbol 7".to_string(),
                price: 25000,
                stock: 1,
                category: Category::Cancha,
                owner_id: seller.id,
                availability: Some(window),
            })
            .await?;
        let balon = tienda
            .catalog()
            .create_product(ProductCreate {
                name: "Balón de fútbol".to_string(),
                price: 4000,
                stock: 10,
                category: Category::AccesorioDeportivo,
                owner_id: seller.id,
                availability: None,
            })
            .await?;
        Ok::<_, tienda::product_actor::ProductError>((cancha, balon))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    info!(%cancha, %balon, "Catalog seeded");

    // Saturday evening
    let at = NaiveDate::from_ymd_opt(2024, 6, 8)
        .and_then(|d| d.and_hms_opt(19, 30, 0))
        .ok_or("invalid reservation date")?;

    let span = tracing::info_span!("shopping", user_id = %customer.id);
    let checkout = async {
        tienda.add_to_cart(Some(&customer), cancha, 1).await?;
        tienda.add_to_cart(Some(&customer), balon, 2).await?;

        let totals = tienda.cart_totals(Some(&customer)).await?.value;
        info!(
            subtotal = totals.subtotal,
            shipping = totals.shipping,
            total = totals.total,
            "Cart priced"
        );

        let reservations = HashMap::from([(cancha, at)]);
        tienda.checkout(Some(&customer), &reservations).await
    }
    .instrument(span)
    .await;

    let created = match checkout {
        Ok(outcome) => {
            if let Some(notice) = outcome.notice {
                info!(%notice, "Checkout");
            }
            outcome.value
        }
        Err(e) => {
            error!(error = %e, message = %e.message(), "Checkout failed");
            tienda.shutdown().await?;
            return Err(e.to_string());
        }
    };

    for solicitud in &created {
        let result = if solicitud.product_id == cancha {
            tienda
                .approve_solicitud(Some(&seller), solicitud.id)
                .await
                .map(|o| o.notice)
        } else {
            tienda
                .delete_solicitud(Some(&customer), solicitud.id)
                .await
                .map(|o| o.notice)
        };
        match result {
            Ok(Some(notice)) => info!(id = %solicitud.id, %notice, "Solicitud handled"),
            Ok(None) => {}
            Err(e) => warn!(id = %solicitud.id, message = %e.message(), "Solicitud not handled"),
        }
    }

    match tienda.catalog().check_stock(balon).await {
        Ok(stock) => info!(%balon, stock, "Stock after delete"),
        Err(e) => warn!(error = %e, "Could not read stock"),
    }

    tienda.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
