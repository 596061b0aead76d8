//! Test Helpers

use crate::{
    auth::UserUuid,
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::CartLine,
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            name: name.to_string(),
            description: None,
            price,
            stock: 10,
        })
        .await
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: i64,
) -> Result<CartLine, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}
