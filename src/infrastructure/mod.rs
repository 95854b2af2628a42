pub mod entities;
pub mod schema;
pub mod sqlite_content_repository;
pub mod sqlite_user_repository;
pub mod whatsapp_gateway;
