use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brasa_core::{DomainError, DomainResult, Price, ProductId, UserId};

/// A catalog product.
///
/// A product is either priced or quote-only (`preguntar_cotizacion`): the two
/// are mutually exclusive, and quote-only lines never contribute to cart
/// subtotals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub nombre: String,
    pub codigo_referencia: String,
    pub descripcion: Option<String>,
    pub materiales: Option<String>,
    pub tamano: Option<String>,
    pub capacidad: Option<String>,
    pub foto_url: Option<String>,
    pub precio: Option<Price>,
    pub preguntar_cotizacion: bool,
    pub creado_por: UserId,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
}

/// Fields captured by the product form, for both create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub nombre: String,
    pub codigo_referencia: String,
    pub descripcion: Option<String>,
    pub materiales: Option<String>,
    pub tamano: Option<String>,
    pub capacidad: Option<String>,
    pub foto_url: Option<String>,
    pub precio: Option<Price>,
    pub preguntar_cotizacion: bool,
}

impl ProductDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.nombre.trim().is_empty() {
            return Err(DomainError::validation("el nombre es requerido"));
        }
        if self.codigo_referencia.trim().is_empty() {
            return Err(DomainError::validation(
                "el código de referencia es requerido",
            ));
        }
        if self.preguntar_cotizacion && self.precio.is_some() {
            return Err(DomainError::invariant(
                "un producto de cotización no lleva precio",
            ));
        }
        if let Some(precio) = self.precio {
            if precio.is_zero() {
                return Err(DomainError::validation("el precio debe ser mayor a 0"));
            }
        }
        Ok(())
    }
}

impl Product {
    pub fn create(
        id: ProductId,
        draft: ProductDraft,
        creado_por: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Product> {
        draft.validate()?;
        Ok(Product {
            id,
            nombre: draft.nombre.trim().to_string(),
            codigo_referencia: draft.codigo_referencia.trim().to_string(),
            descripcion: draft.descripcion,
            materiales: draft.materiales,
            tamano: draft.tamano,
            capacidad: draft.capacidad,
            foto_url: draft.foto_url,
            precio: draft.precio,
            preguntar_cotizacion: draft.preguntar_cotizacion,
            creado_por,
            fecha_creacion: now,
            fecha_actualizacion: None,
        })
    }

    /// Wholesale field update from an edit form.
    pub fn apply_update(&mut self, draft: ProductDraft, now: DateTime<Utc>) -> DomainResult<()> {
        draft.validate()?;
        self.nombre = draft.nombre.trim().to_string();
        self.codigo_referencia = draft.codigo_referencia.trim().to_string();
        self.descripcion = draft.descripcion;
        self.materiales = draft.materiales;
        self.tamano = draft.tamano;
        self.capacidad = draft.capacidad;
        self.foto_url = draft.foto_url;
        self.precio = draft.precio;
        self.preguntar_cotizacion = draft.preguntar_cotizacion;
        self.fecha_actualizacion = Some(now);
        Ok(())
    }

    pub fn is_quote_only(&self) -> bool {
        self.preguntar_cotizacion
    }
}
