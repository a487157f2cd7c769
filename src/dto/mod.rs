pub mod test_dto;
pub mod user_dto;
