//! Request DTOs and JSON response mapping.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use brasa_auth::{DocumentType, Profile, ProfileStore};
use brasa_cart::Cart;
use brasa_catalog::{Product, ProductDraft};
use brasa_core::Price;
use brasa_coupons::{Coupon, CouponDraft, CouponStatus, DiscountKind};
use brasa_infra::ConsentDecision;
use brasa_quotes::{Job, QuoteRequest};

use super::services::AppServices;

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub tipo_documento: DocumentType,
    pub cedula: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub departamento: Option<String>,
    pub pais: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub nombre: String,
    pub codigo_referencia: String,
    pub descripcion: Option<String>,
    pub materiales: Option<String>,
    pub tamano: Option<String>,
    pub capacidad: Option<String>,
    pub foto_url: Option<String>,
    /// Price in cents; omit for quote-only products.
    pub precio_centavos: Option<u64>,
    #[serde(default)]
    pub preguntar_cotizacion: bool,
}

impl ProductRequest {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            nombre: self.nombre,
            codigo_referencia: self.codigo_referencia,
            descripcion: self.descripcion,
            materiales: self.materiales,
            tamano: self.tamano,
            capacidad: self.capacidad,
            foto_url: self.foto_url,
            precio: self.precio_centavos.map(Price::from_cents),
            preguntar_cotizacion: self.preguntar_cotizacion,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CartAddRequest {
    pub producto_id: String,
    #[serde(default = "default_quantity")]
    pub cantidad: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CartQuantityRequest {
    pub cantidad: u32,
}

#[derive(Debug, Deserialize)]
pub struct DiscountCodeRequest {
    pub codigo: String,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSubmitRequest {
    pub direccion_envio: String,
    pub departamento: String,
    pub comentarios_adicionales: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteStatusRequest {
    pub estado: String,
    pub observaciones: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CouponRequest {
    pub codigo: String,
    pub descripcion: Option<String>,
    pub tipo_descuento: DiscountKind,
    pub valor: u64,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_vencimiento: DateTime<Utc>,
    pub cantidad_maxima_usos: u32,
    #[serde(default)]
    pub estado: CouponStatus,
}

impl CouponRequest {
    pub fn into_draft(self) -> CouponDraft {
        CouponDraft {
            codigo: self.codigo,
            descripcion: self.descripcion,
            tipo_descuento: self.tipo_descuento,
            valor: self.valor,
            fecha_inicio: self.fecha_inicio,
            fecha_vencimiento: self.fecha_vencimiento,
            cantidad_maxima_usos: self.cantidad_maxima_usos,
            estado: self.estado,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConsentRequest {
    pub decision: ConsentDecision,
    pub sesion_hash: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response mapping
// ─────────────────────────────────────────────────────────────────────────────

pub fn product_to_json(product: &Product) -> Value {
    json!({
        "id": product.id.to_string(),
        "nombre": product.nombre,
        "codigo_referencia": product.codigo_referencia,
        "descripcion": product.descripcion,
        "materiales": product.materiales,
        "tamano": product.tamano,
        "capacidad": product.capacidad,
        "foto_url": product.foto_url,
        "precio_centavos": product.precio.map(|p| p.cents()),
        "precio": product.precio.map(|p| p.to_string()),
        "preguntar_cotizacion": product.preguntar_cotizacion,
        "fecha_creacion": product.fecha_creacion,
        "fecha_actualizacion": product.fecha_actualizacion,
    })
}

pub fn cart_to_json(cart: &Cart) -> Value {
    let totals = cart.totals();
    json!({
        "items": cart
            .lines
            .iter()
            .map(|line| {
                json!({
                    "producto": product_to_json(&line.product),
                    "cantidad": line.cantidad,
                })
            })
            .collect::<Vec<_>>(),
        "descuento_aplicado": cart.discount.as_ref().map(|d| {
            json!({
                "codigo": d.codigo,
                "tipo_descuento": d.tipo_descuento,
                "valor": d.valor,
            })
        }),
        "resumen": {
            "total_productos": totals.total_items,
            "lineas_con_precio": totals.priced_lines,
            "lineas_para_cotizar": totals.quote_only_lines,
            "subtotal_centavos": totals.subtotal.cents(),
            "descuento_centavos": totals.descuento.cents(),
            "total_centavos": totals.total.cents(),
            "total": totals.total.to_string(),
        },
    })
}

pub fn coupon_to_json(coupon: &Coupon) -> Value {
    json!({
        "id": coupon.id.to_string(),
        "codigo": coupon.codigo,
        "descripcion": coupon.descripcion,
        "tipo_descuento": coupon.tipo_descuento,
        "valor": coupon.valor,
        "fecha_inicio": coupon.fecha_inicio,
        "fecha_vencimiento": coupon.fecha_vencimiento,
        "cantidad_maxima_usos": coupon.cantidad_maxima_usos,
        "cantidad_usos_actuales": coupon.cantidad_usos_actuales,
        "estado": coupon.estado,
        "fecha_creacion": coupon.fecha_creacion,
    })
}

pub fn profile_to_json(profile: &Profile) -> Value {
    json!({
        "id": profile.user_id.to_string(),
        "nombre": profile.nombre,
        "apellido": profile.apellido,
        "tipo_documento": profile.tipo_documento,
        "cedula": profile.cedula,
        "telefono": profile.telefono,
        "direccion": profile.direccion,
        "departamento": profile.departamento,
        "pais": profile.pais,
        "rol": profile.rol,
        "estado": profile.estado,
        "fecha_registro": profile.fecha_registro,
    })
}

/// Quote with its items resolved against the catalog, plus the requester for
/// back-office views.
pub fn quote_to_json(
    quote: &QuoteRequest,
    services: &AppServices,
    include_requester: bool,
) -> Value {
    let items = quote
        .items
        .iter()
        .map(|item| {
            let product = services.products.get(&item.producto_id);
            json!({
                "producto_id": item.producto_id.to_string(),
                "cantidad": item.cantidad,
                "nombre": product.as_ref().map(|p| p.nombre.clone()),
                "codigo_referencia": product.as_ref().map(|p| p.codigo_referencia.clone()),
                "preguntar_cotizacion": product.as_ref().map(|p| p.preguntar_cotizacion),
            })
        })
        .collect::<Vec<_>>();

    let requester = include_requester
        .then(|| {
            services
                .profiles
                .profile_by_identity(quote.usuario_id)
                .ok()
                .flatten()
        })
        .flatten()
        .map(|p| {
            json!({
                "nombre": p.nombre,
                "apellido": p.apellido,
                "cedula": p.cedula,
                "telefono": p.telefono,
            })
        });

    json!({
        "id": quote.id.to_string(),
        "usuario_id": quote.usuario_id.to_string(),
        "usuario": requester,
        "direccion_envio": quote.direccion_envio,
        "departamento": quote.departamento,
        "comentarios_adicionales": quote.comentarios_adicionales,
        "estado": quote.estado,
        "fecha_solicitud": quote.fecha_solicitud,
        "fecha_actualizacion": quote.fecha_actualizacion,
        "productos": items,
    })
}

pub fn job_to_json(job: &Job) -> Value {
    json!({
        "id": job.id.to_string(),
        "cotizacion_id": job.cotizacion_id.to_string(),
        "fecha_asignacion": job.fecha_asignacion,
        "observaciones": job.observaciones,
    })
}
