pub mod drop_zone;
pub mod pet_card;
pub mod pet_form;
pub mod result_card;
pub mod sidebar;
