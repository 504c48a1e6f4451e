// =============================================================================
// CAT STATUS VALUES
// =============================================================================

/// Cat is still looking for a home
pub const STATUS_AVAILABLE: &str = "available";

/// Cat has been adopted
pub const STATUS_ADOPTED: &str = "adopted";

// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

pub const MESSAGE_STATUS_UPDATED: &str = "Status updated";

pub const MESSAGE_CAT_DELETED: &str = "Cat deleted";

/// Public URL prefix uploaded files are served under
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Multipart field carrying the optional image
pub const IMAGE_FIELD: &str = "imageFile";
