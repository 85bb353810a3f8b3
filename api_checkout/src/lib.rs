use actix_web::web::{self};

pub mod routes {
    pub mod checkout;
}

mod services {
    pub(crate) mod checkout;
}

mod dtos {
    pub(crate) mod checkout;
}

pub fn mount_stripe() -> actix_web::Scope {
    web::scope("/stripe")
        .service(routes::checkout::post_create_checkout)
        .service(routes::checkout::post_webhook)
}
