#[cfg(feature = "backend")]
pub mod back_shared;

#[cfg(feature = "client")]
pub mod front;

pub fn validate() {
    #[cfg(feature = "backend")]
    back_shared::validate();
}
