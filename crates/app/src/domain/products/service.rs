//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::{PgProductsRepository, ProductRow},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

fn product_row<'a>(
    name: &'a str,
    description: Option<&'a str>,
    price: u64,
    stock: u32,
) -> Result<ProductRow<'a>, ProductsServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ProductsServiceError::MissingRequiredData);
    }

    Ok(ProductRow {
        name,
        description,
        price: i64::try_from(price)?,
        stock: i64::from(stock),
    })
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let row = product_row(
            &product.name,
            product.description.as_deref(),
            product.price,
            product.stock,
        )?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::new(), row)
            .await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let row = product_row(
            &update.name,
            update.description.as_deref(),
            update.price,
            update.stock,
        )?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_product(&mut tx, product, row).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product_uuid = %product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products still in the catalog, oldest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces every field of an existing product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Removes a product from the catalog. Cart and order lines keep referring to it.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn widget(price: u64) -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: Some("A small widget".to_string()),
            price,
            stock: 3,
        }
    }

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(widget(999)).await?;

        assert_eq!(product.name, "Widget");
        assert_eq!(product.description.as_deref(), Some("A small widget"));
        assert_eq!(product.price, 999);
        assert_eq!(product.stock, 3);
        assert!(product.is_available());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_allows_duplicate_names() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.products.create_product(widget(100)).await?;
        let second = ctx.products.create_product(widget(200)).await?;

        assert_ne!(first.uuid, second.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_with_blank_name_returns_missing_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(NewProduct {
                name: "   ".to_string(),
                ..widget(100)
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_with_huge_price_is_out_of_range() {
        let ctx = TestContext::new().await;

        let result = ctx.products.create_product(widget(u64::MAX)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::OutOfRange(_))),
            "expected OutOfRange, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(widget(250)).await?;
        let fetched = ctx.products.get_product(created.uuid).await?;

        assert_eq!(fetched, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_returns_all_in_creation_order() -> TestResult {
        let ctx = TestContext::new().await;

        let a = ctx.products.create_product(widget(100)).await?;
        let b = ctx.products.create_product(widget(200)).await?;

        let uuids: Vec<ProductUuid> = ctx
            .products
            .list_products()
            .await?
            .into_iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(uuids, vec![a.uuid, b.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(ctx.products.list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_all_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(widget(500)).await?;

        let updated = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    name: "Gadget".to_string(),
                    description: None,
                    price: 750,
                    stock: 0,
                },
            )
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.description, None);
        assert_eq!(updated.price, 750);
        assert_eq!(updated.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductUuid::new(),
                ProductUpdate {
                    name: "Gadget".to_string(),
                    description: None,
                    price: 100,
                    stock: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(widget(300)).await?;

        ctx.products.delete_product(created.uuid).await?;

        let result = ctx.products.get_product(created.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        assert!(ctx.products.list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_unknown_uuid_returns_not_found_without_mutation() -> TestResult {
        let ctx = TestContext::new().await;

        let existing = ctx.products.create_product(widget(300)).await?;

        let result = ctx.products.delete_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let remaining = ctx.products.list_products().await?;

        assert_eq!(remaining, vec![existing]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_keeps_row_for_existing_references() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(widget(300)).await?;

        ctx.products.delete_product(created.uuid).await?;

        let deleted: bool =
            sqlx::query_scalar("SELECT deleted_at IS NOT NULL FROM products WHERE uuid = $1")
                .bind(created.uuid)
                .fetch_one(ctx.db.pool())
                .await?;

        assert!(deleted);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(widget(300)).await?;

        ctx.products.delete_product(created.uuid).await?;

        let result = ctx.products.delete_product(created.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
