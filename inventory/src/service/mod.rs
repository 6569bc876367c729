pub mod cascade;
pub mod company_service;
pub mod computer_service;
