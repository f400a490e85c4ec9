pub mod http_executor;
