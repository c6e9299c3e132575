pub mod chat_client;
