// ── Remote product service ──
//
// `ProductService` is the CRUD contract the controller consumes.
// `HttpProductService` fulfils it over `shoely_api::ShoeClient`.

use std::future::Future;

use tracing::debug;

use shoely_api::transport::{TlsMode, TransportConfig};
use shoely_api::{ShoeClient, ShoeId, ShoeWrite};

use crate::config::{ServiceConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{NewProduct, Product, ProductId};

/// CRUD backend for products.
pub trait ProductService: Send + Sync {
    /// Fetch the full collection, in service order.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;

    fn delete_product(&self, id: &ProductId) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn create_product(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn update_product(
        &self,
        id: &ProductId,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;
}

/// [`ProductService`] backed by the REST API.
pub struct HttpProductService {
    client: ShoeClient,
}

impl HttpProductService {
    pub fn new(config: &ServiceConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = ShoeClient::new(config.url.as_str(), &config.resource, &transport)?;
        debug!(url = %client.base_url(), resource = client.resource(), "product service ready");
        Ok(Self { client })
    }
}

impl ProductService for HttpProductService {
    async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        let shoes = self.client.list_shoes().await?;
        Ok(shoes.into_iter().map(Product::from).collect())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), CoreError> {
        self.client.delete_shoe(&ShoeId::from(id)).await?;
        Ok(())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, CoreError> {
        let shoe = self.client.create_shoe(&ShoeWrite::from(product)).await?;
        Ok(Product::from(shoe))
    }

    async fn update_product(&self, id: &ProductId, product: &NewProduct) -> Result<Product, CoreError> {
        let shoe = self
            .client
            .update_shoe(&ShoeId::from(id), &ShoeWrite::from(product))
            .await?;
        Ok(Product::from(shoe))
    }
}

fn build_transport(config: &ServiceConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: config.timeout,
    }
}
