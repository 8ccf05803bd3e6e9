pub mod http_email_client;
pub mod mock_email_client;
