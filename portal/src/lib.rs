pub mod auth_form;
pub mod checkout;
pub mod embedded;
pub mod gate;
pub mod navigate;

#[cfg(test)]
pub(crate) mod test_support;
