use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::{AttendanceStore, EmployeeStore, StoreError};
use crate::error::UniqueKey;
use crate::model::attendance::{Attendance, AttendanceStatus, MarkAttendance};
use crate::model::employee::{Employee, EmployeeSummary, NewEmployee};

#[derive(Default)]
struct Tables {
    employees: BTreeMap<u64, Employee>,
    attendance: BTreeMap<u64, Attendance>,
    /// (employee id, date) -> attendance id
    attendance_days: BTreeMap<(u64, NaiveDate), u64>,
    last_employee_id: u64,
    last_attendance_id: u64,
}

/// In-process store with the same hard constraints as the MySQL schema.
///
/// Every check-then-write runs under a single write lock, so two writers can
/// never both pass a uniqueness check for the same key. Ids only grow and are
/// never handed out twice.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Backend("memory store lock poisoned".to_string())
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list_with_present_count(&self) -> Result<Vec<EmployeeSummary>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;

        let mut present: BTreeMap<u64, i64> = BTreeMap::new();
        for record in tables.attendance.values() {
            if record.status == AttendanceStatus::Present {
                *present.entry(record.employee_id).or_default() += 1;
            }
        }

        Ok(tables
            .employees
            .values()
            .map(|e| EmployeeSummary::new(e.clone(), present.get(&e.id).copied().unwrap_or(0)))
            .collect())
    }

    async fn find_by_identity(
        &self,
        employee_id: &str,
        email: &str,
    ) -> Result<Vec<Employee>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;

        Ok(tables
            .employees
            .values()
            .filter(|e| e.employee_id == employee_id || e.email == email)
            .cloned()
            .collect())
    }

    async fn insert(&self, employee: &NewEmployee) -> Result<Employee, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;

        if tables
            .employees
            .values()
            .any(|e| e.employee_id == employee.employee_id)
        {
            return Err(StoreError::UniqueViolation(UniqueKey::EmployeeId));
        }
        if tables.employees.values().any(|e| e.email == employee.email) {
            return Err(StoreError::UniqueViolation(UniqueKey::Email));
        }

        tables.last_employee_id += 1;
        let stored = Employee {
            id: tables.last_employee_id,
            employee_id: employee.employee_id.clone(),
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
        };
        tables.employees.insert(stored.id, stored.clone());
        debug!(id = stored.id, employee_id = %stored.employee_id, "Inserted employee");

        Ok(stored)
    }

    async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;

        if tables.employees.remove(&id).is_none() {
            return Ok(false);
        }

        let Tables {
            attendance,
            attendance_days,
            ..
        } = &mut *tables;
        attendance.retain(|_, record| record.employee_id != id);
        attendance_days.retain(|(employee_id, _), _| *employee_id != id);

        Ok(true)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.employees.len() as i64)
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn upsert(&self, mark: &MarkAttendance) -> Result<Attendance, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;

        if !tables.employees.contains_key(&mark.employee_id) {
            return Err(StoreError::ForeignKeyViolation);
        }

        let key = (mark.employee_id, mark.date);
        if let Some(id) = tables.attendance_days.get(&key).copied() {
            let record = tables
                .attendance
                .get_mut(&id)
                .ok_or_else(|| StoreError::Backend(format!("dangling attendance index {}", id)))?;
            record.status = mark.status;
            return Ok(record.clone());
        }

        tables.last_attendance_id += 1;
        let record = Attendance {
            id: tables.last_attendance_id,
            employee_id: mark.employee_id,
            date: mark.date,
            status: mark.status,
        };
        tables.attendance_days.insert(key, record.id);
        tables.attendance.insert(record.id, record.clone());

        Ok(record)
    }

    async fn for_employee(&self, employee_id: u64) -> Result<Vec<Attendance>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;

        // attendance_days is ordered by (employee, date)
        Ok(tables
            .attendance_days
            .range((employee_id, NaiveDate::MIN)..=(employee_id, NaiveDate::MAX))
            .rev()
            .filter_map(|(_, id)| tables.attendance.get(id).cloned())
            .collect())
    }

    async fn count_by_date_and_status(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<i64, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;

        Ok(tables
            .attendance
            .values()
            .filter(|record| record.date == date && record.status == status)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(employee_id: &str, email: &str) -> NewEmployee {
        NewEmployee {
            employee_id: employee_id.into(),
            full_name: "Ana".into(),
            email: email.into(),
            department: "Eng".into(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[actix_web::test]
    async fn insert_enforces_both_unique_keys() {
        let store = MemoryStore::new();
        store.insert(&new_employee("E1", "a@x.com")).await.unwrap();

        let err = store.insert(&new_employee("E1", "b@x.com")).await.unwrap_err();
        assert_eq!(err, StoreError::UniqueViolation(UniqueKey::EmployeeId));

        let err = store.insert(&new_employee("E2", "a@x.com")).await.unwrap_err();
        assert_eq!(err, StoreError::UniqueViolation(UniqueKey::Email));

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.insert(&new_employee("E1", "a@x.com")).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());

        let second = store.insert(&new_employee("E1", "a@x.com")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[actix_web::test]
    async fn upsert_rejects_unknown_employee() {
        let store = MemoryStore::new();
        let mark = MarkAttendance {
            employee_id: 42,
            date: day(1),
            status: AttendanceStatus::Present,
        };
        assert_eq!(
            store.upsert(&mark).await.unwrap_err(),
            StoreError::ForeignKeyViolation
        );
    }

    #[actix_web::test]
    async fn delete_cascades_to_attendance() {
        let store = MemoryStore::new();
        let ana = store.insert(&new_employee("E1", "a@x.com")).await.unwrap();
        let bo = store.insert(&new_employee("E2", "b@x.com")).await.unwrap();
        for employee_id in [ana.id, bo.id] {
            let mark = MarkAttendance {
                employee_id,
                date: day(2),
                status: AttendanceStatus::Present,
            };
            store.upsert(&mark).await.unwrap();
        }

        assert!(store.delete(ana.id).await.unwrap());

        assert!(store.for_employee(ana.id).await.unwrap().is_empty());
        assert_eq!(store.for_employee(bo.id).await.unwrap().len(), 1);
        assert_eq!(
            store
                .count_by_date_and_status(day(2), AttendanceStatus::Present)
                .await
                .unwrap(),
            1
        );
    }

    #[actix_web::test]
    async fn delete_of_missing_id_reports_false() {
        let store = MemoryStore::new();
        assert!(!store.delete(9).await.unwrap());
    }
}
