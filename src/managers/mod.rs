pub mod named_service;
