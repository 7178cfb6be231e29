//! Demo data for local development (`BRASA_SEED_DEMO_DATA=true`).

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};

use brasa_auth::{Credentials, DocumentType, ProfileSeed};
use brasa_catalog::{Product, ProductDraft, ProductRepository};
use brasa_core::{CouponId, Price, ProductId, UserId};
use brasa_coupons::{Coupon, CouponDraft, CouponRepository, CouponStatus, DiscountKind};

use crate::auth_provider::InMemoryAuthProvider;

/// Seed one account per role, a small catalog and the launch coupons.
pub fn seed_demo_data(
    auth: &InMemoryAuthProvider,
    products: &Arc<dyn ProductRepository>,
    coupons: &Arc<dyn CouponRepository>,
) -> anyhow::Result<()> {
    let admin_id = seed_account(auth, "admin@arteestufas.co", "Dora", "Quintero", "admin")?;
    seed_account(auth, "cliente@arteestufas.co", "Pedro", "Lizarazo", "cliente")?;
    seed_account(auth, "usuario@arteestufas.co", "Sofía", "Ortega", "usuario")?;

    seed_products(products, admin_id)?;
    seed_coupons(coupons, admin_id)?;

    tracing::info!("demo data seeded");
    Ok(())
}

fn seed_account(
    auth: &InMemoryAuthProvider,
    email: &str,
    nombre: &str,
    apellido: &str,
    rol: &str,
) -> anyhow::Result<UserId> {
    let seed = ProfileSeed {
        nombre: nombre.to_string(),
        apellido: apellido.to_string(),
        tipo_documento: DocumentType::Cc,
        cedula: format!("10900000{}", email.len()),
        telefono: Some("3000000000".to_string()),
        direccion: Some("Cúcuta, Colombia".to_string()),
        departamento: Some("Norte de Santander".to_string()),
        pais: Some("Colombia".to_string()),
    };
    auth.register_with_role(&Credentials::new(email, "brasa-demo"), seed, rol)
        .with_context(|| format!("seeding account {email}"))
}

fn seed_products(products: &Arc<dyn ProductRepository>, creado_por: UserId) -> anyhow::Result<()> {
    let now = Utc::now();
    let drafts = [
        ProductDraft {
            nombre: "Estufa leñera tradicional".to_string(),
            codigo_referencia: "AE-001".to_string(),
            descripcion: Some("Estufa de leña en lámina calibre 16 con horno".to_string()),
            materiales: Some("Acero al carbón, pintura electrostática".to_string()),
            tamano: Some("90x60x85 cm".to_string()),
            capacidad: Some("Horno de 40 L".to_string()),
            foto_url: None,
            precio: Some(Price::from_cents(1_250_000_00)),
            preguntar_cotizacion: false,
        },
        ProductDraft {
            nombre: "Estufa compacta de apartamento".to_string(),
            codigo_referencia: "AE-002".to_string(),
            descripcion: Some("Modelo pequeño para espacios reducidos".to_string()),
            materiales: Some("Acero al carbón".to_string()),
            tamano: Some("60x40x70 cm".to_string()),
            capacidad: None,
            foto_url: None,
            precio: Some(Price::from_cents(780_000_00)),
            preguntar_cotizacion: false,
        },
        ProductDraft {
            nombre: "Horno panadero a medida".to_string(),
            codigo_referencia: "AE-010".to_string(),
            descripcion: Some("Horno industrial fabricado según especificación".to_string()),
            materiales: Some("Acero inoxidable".to_string()),
            tamano: None,
            capacidad: None,
            foto_url: None,
            precio: None,
            preguntar_cotizacion: true,
        },
    ];

    for draft in drafts {
        let product = Product::create(ProductId::new(), draft, creado_por, now)
            .context("seeding product")?;
        products.insert(product).context("inserting seeded product")?;
    }
    Ok(())
}

fn seed_coupons(coupons: &Arc<dyn CouponRepository>, creado_por: UserId) -> anyhow::Result<()> {
    let now = Utc::now();
    let launch_codes = [("ARTE10", 10), ("PROMO15", 15), ("NAVIDAD20", 20), ("VERANO25", 25)];

    for (codigo, valor) in launch_codes {
        let draft = CouponDraft {
            codigo: codigo.to_string(),
            descripcion: Some(format!("Descuento del {valor}%")),
            tipo_descuento: DiscountKind::Porcentaje,
            valor,
            fecha_inicio: now - Duration::days(1),
            fecha_vencimiento: now + Duration::days(90),
            cantidad_maxima_usos: 100,
            estado: CouponStatus::Activo,
        };
        let coupon = Coupon::create(CouponId::new(), draft, creado_por, now)
            .context("seeding coupon")?;
        coupons.insert(coupon).context("inserting seeded coupon")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_feed::ChangeFeed;
    use crate::stores::{InMemoryCouponRepository, InMemoryProductRepository, InMemoryProfileDirectory};
    use brasa_auth::{AuthProvider, ProfileStore};

    #[test]
    fn seeding_provisions_accounts_catalog_and_coupons() {
        let feed = ChangeFeed::default();
        let profiles = Arc::new(InMemoryProfileDirectory::new(feed.clone()));
        let auth = InMemoryAuthProvider::new(profiles.clone());
        let products: Arc<dyn ProductRepository> =
            Arc::new(InMemoryProductRepository::new(feed.clone()));
        let coupons: Arc<dyn CouponRepository> =
            Arc::new(InMemoryCouponRepository::new(feed));

        seed_demo_data(&auth, &products, &coupons).unwrap();

        assert_eq!(profiles.count(), 3);
        assert_eq!(products.count(), 3);
        assert!(coupons.find_by_code("ARTE10").is_some());
        assert!(coupons.find_by_code("VERANO25").is_some());

        let session = auth
            .sign_in(&Credentials::new("admin@arteestufas.co", "brasa-demo"))
            .unwrap();
        let profile = profiles.profile_by_identity(session.user_id).unwrap().unwrap();
        assert_eq!(profile.rol, "admin");
    }
}
