use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{
    attendees, chat, events, galleries, health_check, invitations, payments, prices, tokens,
};
use crate::realtime::ws::chat_socket;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let api = Router::new()
        .nest("/events", event_routes())
        .nest("/price", price_routes())
        .nest("/gallery", gallery_routes())
        .nest("/attendees", attendee_routes())
        .nest("/invitation", invitation_routes())
        .nest("/chat", chat_routes())
        .nest("/payments", payment_routes())
        .nest("/tokens", token_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(state.config.production))
        .layer(create_cors_layer(&state.config))
        .with_state(state)
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(events::create_event))
        .route("/:id/update", patch(events::update_event))
        .route("/all", get(events::list_events))
        .route("/all/deleted", get(events::list_deleted_events))
        .route("/mine", get(events::list_my_events))
        .route("/:id/one", get(events::get_event))
        .route("/search", get(events::search_events))
        .route("/search-by-town", get(events::search_events_by_town))
        .route("/:id/delete", patch(events::soft_delete_event))
        .route("/:id/harddelete", delete(events::hard_delete_event))
        .route("/request-cards", post(events::request_cards))
}

fn price_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(prices::create_price))
        .route("/:id/update", patch(prices::update_price))
        .route("/event/:id", get(prices::prices_for_event))
        .route("/:id/one", get(prices::get_price))
        .route("/all", get(prices::list_prices))
        .route("/all/deleted", get(prices::list_deleted_prices))
        .route("/:id/delete", patch(prices::soft_delete_price))
        .route("/:id/harddelete", delete(prices::hard_delete_price))
}

fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(galleries::create_gallery))
        .route("/:id/update", patch(galleries::update_gallery))
        .route("/event/:id", get(galleries::galleries_for_event))
        .route("/:id/one", get(galleries::get_gallery))
        .route("/all", get(galleries::list_galleries))
        .route("/all/deleted", get(galleries::list_deleted_galleries))
        .route("/:id/delete", patch(galleries::soft_delete_gallery))
        .route("/:id/harddelete", delete(galleries::hard_delete_gallery))
}

fn attendee_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(attendees::create_attendee))
        .route("/:id/update", patch(attendees::update_attendee))
        .route("/event/:id", get(attendees::attendees_for_event))
        .route("/:id/one", get(attendees::get_attendee))
        .route("/all", get(attendees::list_attendees))
        .route("/all/deleted", get(attendees::list_deleted_attendees))
        .route("/:id/check-in", patch(attendees::check_in_attendee))
        .route("/:id/send-thank-you", post(attendees::send_thank_you))
        .route("/:id/delete", patch(attendees::soft_delete_attendee))
        .route("/:id/harddelete", delete(attendees::hard_delete_attendee))
}

fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(invitations::create_invitation))
        .route("/:id/update", patch(invitations::update_invitation))
        .route("/event/:id", get(invitations::invitations_for_event))
        .route("/:id/one", get(invitations::get_invitation))
        .route("/all", get(invitations::list_invitations))
        .route("/all/deleted", get(invitations::list_deleted_invitations))
        .route("/search/invitations", get(invitations::search_invitations))
        .route(
            "/search/event-invitations/:id",
            get(invitations::search_event_invitations),
        )
        .route(
            "/validate/:event_id/:token",
            get(invitations::validate_invitation),
        )
        .route("/accept/:token", post(invitations::accept_invitation))
        .route("/:id/delete", patch(invitations::soft_delete_invitation))
        .route("/:id/harddelete", delete(invitations::hard_delete_invitation))
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(chat::create_room))
        .route("/:id/update-chatroom", patch(chat::update_room))
        .route("/event-chatroom/:id", get(chat::room_for_event))
        .route("/:id/chatroom-one", get(chat::get_room))
        .route("/all", get(chat::list_rooms))
        .route("/all/deleted", get(chat::list_deleted_rooms))
        .route("/:id/delete", patch(chat::soft_delete_room))
        .route("/:id/harddelete", delete(chat::hard_delete_room))
        .route("/:id/members", post(chat::add_member).get(chat::list_members))
        .route(
            "/:id/messages",
            post(chat::send_message).get(chat::list_messages),
        )
        .route("/:id/search", get(chat::search_messages))
        .route("/:id/update-message", patch(chat::update_message))
        .route("/:id/delete-message", patch(chat::soft_delete_message))
        .route("/:id/harddelete-message", delete(chat::hard_delete_message))
        .route("/ws", get(chat_socket))
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/initialize", post(payments::initialize_payment))
        .route("/verify", post(payments::verify_payment))
}

fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(tokens::generate_tokens))
        .route("/all", get(tokens::list_tokens))
        .route("/redeem", post(tokens::redeem_token))
}
