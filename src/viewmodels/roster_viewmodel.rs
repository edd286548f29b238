// ============================================================================
// ROSTER VIEWMODEL - Gestión de empleados (administrador)
// ============================================================================

use std::rc::Rc;

use crate::errors::ValidationError;
use crate::models::employee::NewEmployee;
use crate::models::leave::parse_date;
use crate::services::traits::AdminApi;
use crate::state::{Banner, ChangeNotifier, RosterState};

use super::admin_viewmodel::load_error_message;

pub fn validate_employee(draft: &NewEmployee) -> Result<NewEmployee, ValidationError> {
    let required = [&draft.name, &draft.email, &draft.password, &draft.tanggal_masuk];
    if required.iter().any(|v| v.trim().is_empty()) || draft.divisi_id == 0 {
        return Err(ValidationError::MissingFields);
    }
    let join_date = parse_date(&draft.tanggal_masuk).ok_or(ValidationError::InvalidDate)?;
    Ok(NewEmployee {
        name: draft.name.trim().to_string(),
        email: draft.email.trim().to_string(),
        password: draft.password.clone(),
        divisi_id: draft.divisi_id,
        tanggal_masuk: join_date.format("%Y-%m-%d").to_string(),
    })
}

#[derive(Clone)]
pub struct RosterViewModel {
    state: RosterState,
    api: Rc<dyn AdminApi>,
    notifier: ChangeNotifier,
}

impl RosterViewModel {
    pub fn new(state: RosterState, api: Rc<dyn AdminApi>, notifier: ChangeNotifier) -> Self {
        Self { state, api, notifier }
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub async fn load(&self) {
        *self.state.loading.borrow_mut() = true;
        *self.state.error.borrow_mut() = None;
        self.notifier.notify();

        let result = self.api.list_employees().await;
        match result {
            Ok(employees) => {
                log::info!("👥 [KARYAWAN] {} empleados", employees.len());
                *self.state.employees.borrow_mut() = employees;
            }
            Err(e) => {
                log::error!("❌ [KARYAWAN] {}", e);
                *self.state.error.borrow_mut() = Some(load_error_message(&e).to_string());
            }
        }
        *self.state.loading.borrow_mut() = false;
        self.notifier.notify();
    }

    /// Búsqueda en cliente
    pub fn set_query(&self, query: String) {
        *self.state.query.borrow_mut() = query;
        self.notifier.notify();
    }

    pub fn open_form(&self, open: bool) {
        *self.state.form_open.borrow_mut() = open;
        *self.state.form_error.borrow_mut() = None;
        if !open {
            *self.state.draft.borrow_mut() = NewEmployee::default();
        }
        self.notifier.notify();
    }

    pub fn update_draft<F: FnOnce(&mut NewEmployee)>(&self, update: F) {
        update(&mut self.state.draft.borrow_mut());
    }

    pub async fn create(&self) -> bool {
        let employee = match validate_employee(&self.state.get_draft()) {
            Ok(employee) => employee,
            Err(e) => {
                *self.state.form_error.borrow_mut() = Some(e.to_string());
                self.notifier.notify();
                return false;
            }
        };

        let result = self.api.create_employee(&employee).await;
        match result {
            Ok(()) => {
                log::info!("✅ [KARYAWAN] {} añadido", employee.email);
                *self.state.draft.borrow_mut() = NewEmployee::default();
                *self.state.form_open.borrow_mut() = false;
                *self.state.banner.borrow_mut() =
                    Some(Banner::success("Sukses! Karyawan berhasil ditambahkan."));
                self.load().await;
                true
            }
            Err(e) => {
                *self.state.form_error.borrow_mut() = Some(format!(
                    "Gagal: {}",
                    e.backend_message().unwrap_or("Terjadi kesalahan")
                ));
                self.notifier.notify();
                false
            }
        }
    }

    /// Elimina al empleado (la confirmación la pide la vista)
    pub async fn delete(&self, id: u64) -> bool {
        let result = self.api.delete_employee(id).await;
        let ok = match result {
            Ok(()) => {
                self.state.employees.borrow_mut().retain(|e| e.id != id);
                *self.state.banner.borrow_mut() = Some(Banner::success("Karyawan berhasil dihapus."));
                true
            }
            Err(e) => {
                *self.state.banner.borrow_mut() = Some(Banner::error(format!(
                    "Gagal menghapus: {}",
                    e.backend_message().unwrap_or("Server Error")
                )));
                false
            }
        };
        self.notifier.notify();
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::Employee;
    use crate::viewmodels::test_support::FakeAdminApi;
    use futures::executor::block_on;

    fn employee(id: u64, name: &str, email: &str) -> Employee {
        Employee {
            id,
            name: name.into(),
            email: email.into(),
            divisi_id: Some(1),
            divisi: None,
            join_date: None,
            token_absen: None,
        }
    }

    fn vm() -> (RosterViewModel, Rc<FakeAdminApi>) {
        let api = Rc::new(FakeAdminApi::default());
        api.employees.borrow_mut().extend([
            employee(1, "Dewi Lestari", "dewi@damirich.id"),
            employee(2, "Agus Salim", "agus@damirich.id"),
        ]);
        (RosterViewModel::new(RosterState::default(), api.clone(), ChangeNotifier::new()), api)
    }

    #[test]
    fn search_filters_client_side() {
        let (vm, _) = vm();
        block_on(vm.load());
        vm.set_query("AGUS".into());
        let shown = vm.state().filtered();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, 2);
    }

    #[test]
    fn delete_removes_locally() {
        let (vm, api) = vm();
        block_on(vm.load());
        assert!(block_on(vm.delete(1)));
        assert_eq!(*api.deleted.borrow(), vec![1]);
        assert_eq!(vm.state().filtered().len(), 1);
    }

    #[test]
    fn create_requires_every_field() {
        let (vm, api) = vm();
        vm.update_draft(|d| {
            d.name = "Rudi".into();
            d.email = "rudi@damirich.id".into();
            d.divisi_id = 1;
        });
        assert!(!block_on(vm.create()));
        assert!(api.created.borrow().is_empty());
        assert_eq!(vm.state().get_form_error(), Some(ValidationError::MissingFields.to_string()));

        vm.update_draft(|d| {
            d.password = "rahasia".into();
            d.tanggal_masuk = "2026-10-01".into();
        });
        assert!(block_on(vm.create()));
        assert_eq!(api.created.borrow()[0].name, "Rudi");
        assert_eq!(vm.state().get_draft(), NewEmployee::default());
    }
}
