//! Id-keyed record tables.

use std::collections::BTreeMap;

use fleetkeep_core::error::StoreError;
use fleetkeep_core::model::{
    Asset, Assignment, BufferConsumption, BufferStock, Customer, Employee, Order,
    ProcurementRequest, Quotation, RepairService, ReturnRequest, ServiceVendor, Supplier,
};
use fleetkeep_core::types::DbId;

/// A record the store can key by id.
pub trait Record: Clone {
    /// Table name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> DbId;
    fn set_id(&mut self, id: DbId);
}

macro_rules! impl_record {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: &'static str = $kind;

                fn id(&self) -> DbId {
                    self.id
                }

                fn set_id(&mut self, id: DbId) {
                    self.id = id;
                }
            }
        )+
    };
}

impl_record! {
    Employee => "employees",
    Asset => "assets",
    Assignment => "assignments",
    ServiceVendor => "service_vendors",
    Supplier => "suppliers",
    RepairService => "repair_services",
    BufferStock => "buffer_stocks",
    BufferConsumption => "buffer_consumptions",
    ProcurementRequest => "procurement_requests",
    Quotation => "quotations",
    Customer => "customers",
    Order => "orders",
    ReturnRequest => "return_requests",
}

/// Records of one kind, with ids assigned from 1 upward.
#[derive(Debug, Clone)]
pub struct Table<T: Record> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Record> Table<T> {
    pub fn get(&self, id: DbId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    /// Store `record` under the next id and return it.
    pub fn insert(&mut self, mut record: T) -> T {
        self.last_id += 1;
        record.set_id(self.last_id);
        self.rows.insert(self.last_id, record.clone());
        record
    }

    /// Replace an existing row. Saving a row that was never inserted is a
    /// storage fault, not a silent insert.
    pub fn save(&mut self, record: &T) -> Result<(), StoreError> {
        match self.rows.get_mut(&record.id()) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "no row {} in {}",
                record.id(),
                T::KIND
            ))),
        }
    }

    /// Rows in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(table name, row count)`.
    pub fn counted(&self) -> (&'static str, usize) {
        (T::KIND, self.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;
    use fleetkeep_core::model::Quotation;

    use super::*;

    fn quotation(price: f64) -> Quotation {
        Quotation {
            id: 0,
            supplier_id: 1,
            request_id: 1,
            item_description: "Monitors".into(),
            quoted_price: price,
            quantity: 2,
            valid_until: None,
            delivery_days: None,
            notes: None,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut table = Table::default();
        let first = table.insert(quotation(10.0));
        let second = table.insert(quotation(20.0));
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(table.get(2).map(|q| q.quoted_price), Some(20.0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn save_replaces_existing_rows_only() {
        let mut table = Table::default();
        let mut stored = table.insert(quotation(10.0));
        stored.quoted_price = 12.5;
        table.save(&stored).unwrap();
        assert_eq!(table.get(stored.id).map(|q| q.quoted_price), Some(12.5));

        let ghost = Quotation {
            id: 99,
            ..quotation(1.0)
        };
        assert_matches!(table.save(&ghost), Err(StoreError::Backend(msg)) if msg.contains("quotations"));
        assert_eq!(table.len(), 1);
    }
}
