pub mod employee;
pub mod form;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/employees")
            .route(web::get().to(employee::get_employees)),
    )
    .service(
        web::resource("/api/sendDataEmployee")
            .route(web::post().to(employee::send_data_employee)),
    );
}
