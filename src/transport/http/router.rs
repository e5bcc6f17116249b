use crate::domain::model::{Product, ProductWithSeller, Seller, SellerContact, SellerProfile, Song, User, Word};
use crate::transport::http::handlers::{accounts, health, products, sellers, songs, words};
use crate::transport::http::types::{
    AddProductRequest, AdminLoginRequest, ApiResponse, ListQuery, LoginUserRequest,
    RegisterUserRequest, SellerLoginRequest, SellerRegisterRequest,
};
use axum::routing::{delete, get, post, put};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        accounts::register_user_handler,
        accounts::login_user_handler,
        accounts::dashboard_handler,
        accounts::logout_user_handler,
        accounts::admin_login_handler,
        accounts::admin_logout_handler,
        sellers::seller_register_handler,
        sellers::seller_login_handler,
        sellers::seller_logout_handler,
        words::get_words_handler,
        words::add_word_handler,
        words::update_word_handler,
        words::delete_word_handler,
        songs::get_songs_handler,
        songs::add_song_handler,
        songs::update_song_handler,
        songs::delete_song_handler,
        products::add_product_handler,
        products::get_products_handler,
        products::get_seller_products_handler,
        products::delete_product_handler
    ),
    components(schemas(
        ApiResponse,
        ListQuery,
        RegisterUserRequest,
        LoginUserRequest,
        AdminLoginRequest,
        SellerRegisterRequest,
        SellerLoginRequest,
        AddProductRequest,
        User,
        Seller,
        SellerProfile,
        SellerContact,
        Product,
        ProductWithSeller,
        Word,
        Song
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/register", post(accounts::register_user_handler))
        .route("/login", post(accounts::login_user_handler))
        .route("/dashboard", get(accounts::dashboard_handler))
        .route("/logout", get(accounts::logout_user_handler))
        .route("/admin/login", post(accounts::admin_login_handler))
        .route("/admin/logout", get(accounts::admin_logout_handler))
        .route("/api/seller/register", post(sellers::seller_register_handler))
        .route("/api/seller/login", post(sellers::seller_login_handler))
        .route("/api/seller/logout", post(sellers::seller_logout_handler))
        .route("/api/words", get(words::get_words_handler).post(words::add_word_handler))
        .route("/api/words/:id", put(words::update_word_handler).delete(words::delete_word_handler))
        .route("/api/songs", get(songs::get_songs_handler).post(songs::add_song_handler))
        .route("/api/songs/:id", put(songs::update_song_handler).delete(songs::delete_song_handler))
        .route("/api/products/add", post(products::add_product_handler))
        .route("/api/products", get(products::get_products_handler))
        .route("/api/products/:id", delete(products::delete_product_handler))
        .route("/api/seller/products", get(products::get_seller_products_handler))
        .with_state(app_state)
}
