use std::sync::Arc;

pub mod audit;
pub mod auth;
pub mod employees;
pub mod logs;
pub mod teams;
pub mod types;

pub use types::HrmsState;

pub struct HrmsServices {
    pub auth: Arc<auth::AuthService>,
    pub employees: Arc<employees::EmployeesService>,
    pub teams: Arc<teams::TeamsService>,
    pub logs: Arc<logs::LogsService>,
}

pub fn configure(state: &HrmsState) -> HrmsServices {
    HrmsServices {
        auth: Arc::new(auth::AuthService::new(state)),
        employees: Arc::new(employees::EmployeesService::new(state)),
        teams: Arc::new(teams::TeamsService::new(state)),
        logs: Arc::new(logs::LogsService::new(state)),
    }
}
