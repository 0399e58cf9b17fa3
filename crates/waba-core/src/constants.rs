//! Shared constants: endpoint segments, wire literals, and error codes.

/// Endpoint segment for outbound messages: `/{phone_number_id}/messages`.
pub const MESSAGES_PATH: &str = "messages";

/// Endpoint segment for template management: `/{phone_number_id}/message_templates`.
pub const TEMPLATES_PATH: &str = "message_templates";

/// Value of `messaging_product` on every outbound message.
pub const MESSAGING_PRODUCT: &str = "whatsapp";

/// Value of `recipient_type` for one-to-one messages.
pub const RECIPIENT_TYPE_INDIVIDUAL: &str = "individual";

/// Page size used by `get_templates` when the caller gives none.
pub const DEFAULT_TEMPLATE_LIMIT: u32 = 20;

/// Error codes carried by [`crate::error::MessageError`].
pub mod codes {
    pub const INVALID_CONTENT: &str = "invalid_content";
    pub const TEMPLATE_NOT_FOUND: &str = "template_not_found";

    pub const SEND_TEMPLATE: &str = "send_template_error";
    pub const GET_TEMPLATES: &str = "get_templates_error";
    pub const CREATE_TEMPLATE: &str = "create_template_error";
    pub const DELETE_TEMPLATE: &str = "delete_template_error";
    pub const GET_TEMPLATE_DETAILS: &str = "get_template_details_error";

    /// Used by HTTP adapters when the request never reached the server.
    pub const NETWORK: &str = "network_error";
}
