//! Behavioural tests for the document store, catalog and ledger

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use tempfile::tempdir;

use vitrine_domain::model::{
    Category, Document, Item, ItemPatch, NewReservation, ReservationStatus, ResidenceDraft,
    VehicleDraft,
};
use vitrine_domain::repository::{CatalogRepository, ReservationLedger};
use vitrine_store::{DocumentStore, FileStorage, MemoryStorage, StorageArea, DOCUMENT_KEY};
use vitrine_types::Error;

/// A store whose document starts with no items and no reservations
fn empty_store() -> DocumentStore<MemoryStorage> {
    let store = DocumentStore::open(MemoryStorage::new()).unwrap();
    let empty = serde_json::to_string(&Document::default()).unwrap();
    store.import_snapshot(&empty).unwrap();
    store
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()
}

#[test]
fn test_created_items_are_available_with_fresh_ids() {
    let store = empty_store();

    let v = store
        .add_vehicle(VehicleDraft::new("Kia Picanto", 5000.0, Category::Rent))
        .unwrap();
    let r = store
        .add_residence(ResidenceDraft::new("Villa duplex", 1200.0, "Bouaké"))
        .unwrap();

    assert!(v.id > 0);
    assert_ne!(v.id, r.id);
    assert!(v.available);
    assert!(r.available);
    assert_eq!(r.category, Category::Rent);
}

#[test]
fn test_find_after_add_returns_created_record() {
    let store = empty_store();
    let v = store
        .add_vehicle(VehicleDraft::new("Hyundai Tucson", 18000.0, Category::Sale))
        .unwrap();

    assert_eq!(store.find_by_id(v.id), Some(Item::Vehicle(v)));
}

#[test]
fn test_update_changes_only_patched_fields() {
    let store = empty_store();
    let r = store
        .add_residence(ResidenceDraft::new("Studio", 300.0, "Marcory"))
        .unwrap();

    let patch = ItemPatch {
        price: Some(350.0),
        ..Default::default()
    };
    assert!(store.update_item(r.id, &patch).unwrap());

    let Some(Item::Residence(updated)) = store.find_by_id(r.id) else {
        panic!("residence missing after update");
    };
    assert_eq!(updated.price, 350.0);
    assert_eq!(updated.title, r.title);
    assert_eq!(updated.location, r.location);
    assert_eq!(updated.id, r.id);
}

#[test]
fn test_delete_removes_exactly_one() {
    let store = DocumentStore::open(MemoryStorage::new()).unwrap();
    let before = store.list_all().len();
    let target = store.list_all()[0].id();

    assert!(store.delete_item(target).unwrap());
    assert_eq!(store.find_by_id(target), None);
    assert_eq!(store.list_all().len(), before - 1);
}

#[test]
fn test_export_import_roundtrip_preserves_order() {
    let store = DocumentStore::open(MemoryStorage::new()).unwrap();
    store
        .add_vehicle(VehicleDraft::new("Renault Duster", 9000.0, Category::Sale))
        .unwrap();
    store
        .append(NewReservation::new(1, "Koffi", date()).with_contact("k@example.ci", "0707070707"))
        .unwrap();
    store
        .append(NewReservation::new(3, "Adjoua", date()))
        .unwrap();

    let items = store.list_all();
    let reservations = store.list();

    let snapshot = store.export_snapshot().unwrap();
    store.import_snapshot(&snapshot).unwrap();

    assert_eq!(store.list_all(), items);
    assert_eq!(store.list(), reservations);
}

#[test]
fn test_set_status_touches_one_reservation() {
    let store = empty_store();
    let first = store.append(NewReservation::new(1, "Aya", date())).unwrap();
    let second = store.append(NewReservation::new(1, "Ibrahim", date())).unwrap();

    assert!(store.set_status(first.id, ReservationStatus::Confirmed).unwrap());

    let list = store.list();
    let confirmed: Vec<_> = list
        .iter()
        .filter(|r| r.id == first.id && r.status == ReservationStatus::Confirmed)
        .collect();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(list[1], second);
}

#[test]
fn test_add_vehicle_for_sale_from_empty_store() {
    let store = empty_store();
    let category: Category = "vente".parse().unwrap();
    store
        .add_vehicle(VehicleDraft::new("Test Car", 1000.0, category))
        .unwrap();

    let for_sale = store.list_for_sale();
    assert_eq!(for_sale.len(), 1);
    assert_eq!(for_sale[0].title, "Test Car");
    assert_eq!(for_sale[0].price, 1000.0);
}

#[test]
fn test_invalid_import_leaves_state_untouched() {
    let store = DocumentStore::open(MemoryStorage::new()).unwrap();
    let before = store.list_all();
    let stamp = store.last_update();

    assert!(matches!(store.import_snapshot("not valid json"), Err(Error::Json(_))));
    assert_eq!(store.list_all(), before);
    assert_eq!(store.last_update(), stamp);
}

#[test]
fn test_back_to_back_reservations_both_kept() {
    let store = empty_store();
    let a = store.append(NewReservation::new(1, "Same", date())).unwrap();
    let b = store.append(NewReservation::new(1, "Tick", date())).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(store.list().len(), 2);
}

#[test]
fn test_write_failure_is_reported_and_memory_stays_ahead() {
    let storage = MemoryStorage::new();
    let store = DocumentStore::open(storage.clone()).unwrap();
    let persisted = storage.get_item(DOCUMENT_KEY).unwrap();

    // Same shared entries, but every write over the quota is refused
    let limited = DocumentStore::open(storage.clone().with_quota(16)).unwrap();
    let err = limited
        .add_vehicle(VehicleDraft::new("Too big", 1.0, Category::Sale))
        .unwrap_err();

    assert!(matches!(err, Error::Storage(_)));
    assert_eq!(limited.list_all().len(), store.list_all().len() + 1);
    assert_eq!(storage.get_item(DOCUMENT_KEY).unwrap(), persisted);
}

#[test]
fn test_last_writer_wins_across_stores() {
    let storage = MemoryStorage::new();
    let tab_a = DocumentStore::open(storage.clone()).unwrap();
    let tab_b = DocumentStore::open(storage.clone()).unwrap();

    tab_a
        .add_vehicle(VehicleDraft::new("From A", 1.0, Category::Sale))
        .unwrap();
    tab_b
        .add_vehicle(VehicleDraft::new("From B", 1.0, Category::Sale))
        .unwrap();

    let stored = DocumentStore::<MemoryStorage>::load(&storage).unwrap();
    let titles: Vec<_> = stored.vehicles.iter().map(|v| v.title.as_str()).collect();
    assert!(titles.contains(&"From B"));
    assert!(!titles.contains(&"From A"));
}

#[test]
fn test_subscribers_see_every_mutation() {
    let store = empty_store();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sub = {
        let events = Rc::clone(&events);
        store.subscribe(move |e| events.borrow_mut().push(e.timestamp))
    };

    let v = store
        .add_vehicle(VehicleDraft::new("Suzuki Swift", 4000.0, Category::Sale))
        .unwrap();
    store.toggle_available(v.id).unwrap();
    store.delete_item(v.id).unwrap();
    assert_eq!(events.borrow().len(), 3);
    assert_eq!(events.borrow().last().copied(), Some(store.last_update()));

    sub.unsubscribe();
    store.save().unwrap();
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let id = {
        let store = DocumentStore::open(FileStorage::open(dir.path().to_path_buf()).unwrap()).unwrap();
        store
            .add_residence(ResidenceDraft::new("Chambre meublée", 150.0, "Yopougon"))
            .unwrap()
            .id
    };

    let reopened = DocumentStore::open(FileStorage::open(dir.path().to_path_buf()).unwrap()).unwrap();
    let found = reopened.find_by_id(id).unwrap();
    assert_eq!(found.title(), "Chambre meublée");

    let stored = std::fs::read_to_string(dir.path().join("vitrine.db.json")).unwrap();
    assert!(stored.contains("\"lastUpdate\""));
    assert!(stored.contains("\"imageRef\""));
}

#[test]
fn test_exhausted_id_space_is_an_error() {
    let store = empty_store();
    store
        .import_snapshot(r#"{"vehicles":[{"id":18446744073709551615,"title":"Max"}]}"#)
        .unwrap();

    let result = store.add_vehicle(VehicleDraft::new("Suzuki Swift", 7000.0, Category::Sale));
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(matches!(
        store.append(NewReservation::new(u64::MAX, "Awa Koné", date())),
        Err(Error::InvalidInput(_))
    ));
    assert_eq!(store.list_all().len(), 1);
    assert!(store.list().is_empty());
}

#[test]
fn test_imported_prices_are_clamped() {
    let store = empty_store();
    store
        .import_snapshot(
            r#"{"vehicles":[{"id":5,"title":"Neg","price":-250}],
                "residences":[{"id":6,"title":"Text","price":"850"}]}"#,
        )
        .unwrap();

    assert_eq!(store.find_by_id(5).map(|i| i.price()), Some(0.0));
    assert_eq!(store.find_by_id(6).map(|i| i.price()), Some(850.0));
}
