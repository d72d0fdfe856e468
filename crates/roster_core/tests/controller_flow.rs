use roster_core::view::frame::PageView;
use roster_core::{
    Controller, Frame, KeyValueStore, KvPersonRepository, MemoryKeyValueStore,
    NotificationKind, PageState, PersonField, PersonRepository, PersonStore, RepoError, RepoResult, UiEvent,
    LOADING_DELAY, NOTIFICATION_TTL, PERSONS_KEY,
};
use std::cell::Cell;
use std::time::{Duration, Instant};

type MemoryController = Controller<KvPersonRepository<MemoryKeyValueStore>>;
type FlakyController = Controller<KvPersonRepository<FlakyStore>>;

/// Key-value store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_writes: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::InvalidData("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }
}

fn loaded_flaky_controller(now: Instant) -> FlakyController {
    let (store, warning) = PersonStore::open(KvPersonRepository::new(FlakyStore::default()));
    assert!(warning.is_none());
    let mut controller = Controller::new(store, warning, now);
    controller.handle(UiEvent::BuildTable, now);
    controller.tick(now + LOADING_DELAY);
    controller
}

fn set_fail_writes(controller: &FlakyController, fail: bool) {
    controller
        .store()
        .repository()
        .store()
        .fail_writes
        .set(fail);
}

fn row_ids(frame: &Frame) -> Vec<u32> {
    frame
        .table()
        .expect("table should be visible")
        .rows
        .iter()
        .map(|row| row.person_id)
        .collect()
}

fn controller_with(store: MemoryKeyValueStore, now: Instant) -> MemoryController {
    let (store, warning) = PersonStore::open(KvPersonRepository::new(store));
    Controller::new(store, warning, now)
}

/// Controller past the loading delay, table visible.
fn loaded_controller(now: Instant) -> MemoryController {
    let mut controller = controller_with(MemoryKeyValueStore::new(), now);
    controller.handle(UiEvent::BuildTable, now);
    controller.tick(now + LOADING_DELAY);
    controller
}

fn fill_form<R: PersonRepository>(controller: &mut Controller<R>, now: Instant, values: [&str; 3]) {
    let fields = [
        PersonField::FirstName,
        PersonField::LastName,
        PersonField::BirthDate,
    ];
    for (field, value) in fields.into_iter().zip(values) {
        controller.handle(UiEvent::EditField(field, value.to_string()), now);
    }
}

#[test]
fn build_table_shows_table_after_loading_delay() {
    let now = Instant::now();
    let mut controller = controller_with(MemoryKeyValueStore::new(), now);

    let frame = controller.handle(UiEvent::BuildTable, now);
    assert!(matches!(frame.page, PageView::Loading { button_label: "Lade..." }));

    let frame = controller.tick(now + LOADING_DELAY - Duration::from_millis(1));
    assert!(frame.table().is_none());

    let frame = controller.tick(now + LOADING_DELAY);
    assert_eq!(controller.page_state(), PageState::Table);
    assert_eq!(frame.table().expect("table should be visible").rows.len(), 5);
    match &frame.page {
        PageView::Table { count_label, .. } => assert_eq!(count_label, "Personen: 5 gefunden"),
        other => panic!("unexpected page: {other:?}"),
    }
    let banner = frame.notification.expect("loaded banner should show");
    assert_eq!(banner.kind, NotificationKind::Success);
    assert_eq!(banner.message, "Tabelle mit 5 Personen erfolgreich geladen!");
}

#[test]
fn build_table_is_ignored_once_loading() {
    let now = Instant::now();
    let mut controller = controller_with(MemoryKeyValueStore::new(), now);
    controller.handle(UiEvent::BuildTable, now);
    controller.handle(UiEvent::BuildTable, now + Duration::from_millis(500));

    assert_eq!(
        controller.page_state(),
        PageState::Loading {
            ready_at: now + LOADING_DELAY
        }
    );
}

#[test]
fn forms_and_deletes_need_the_table() {
    let now = Instant::now();
    let mut controller = controller_with(MemoryKeyValueStore::new(), now);

    let frame = controller.handle(UiEvent::OpenCreateForm, now);
    assert!(frame.form.is_none());
    let frame = controller.handle(UiEvent::RequestDelete(1), now);
    assert!(frame.confirmation.is_none());
}

#[test]
fn submit_with_blank_field_keeps_form_open() {
    let now = Instant::now();
    let mut controller = loaded_controller(now);

    controller.handle(UiEvent::OpenCreateForm, now);
    fill_form(&mut controller, now, ["Eva", "  ", "01.01.2000"]);
    let frame = controller.handle(UiEvent::SubmitForm, now);

    assert!(frame.form.is_some());
    let banner = frame.notification.expect("error banner should show");
    assert_eq!(banner.kind, NotificationKind::Error);
    assert_eq!(banner.message, "Bitte füllen Sie alle Felder aus!");
    assert_eq!(controller.store().len(), 5);
}

#[test]
fn valid_create_submit_adds_record_and_closes_form() {
    let now = Instant::now();
    let mut controller = loaded_controller(now);

    let frame = controller.handle(UiEvent::OpenCreateForm, now);
    let form = frame.form.expect("create form should open");
    assert_eq!(form.title, "Neue Person hinzufügen");
    assert_eq!(form.submit_label, "Hinzufügen");

    fill_form(&mut controller, now, ["Eva", "Klein", "01.01.2000"]);
    controller.handle(
        UiEvent::EditField(PersonField::Avatar, "student_female".to_string()),
        now,
    );
    let frame = controller.handle(UiEvent::SubmitForm, now);

    assert!(frame.form.is_none());
    assert_eq!(
        frame.notification.as_ref().expect("outcome banner should show").message,
        "Person \"Eva Klein\" wurde erfolgreich hinzugefügt!"
    );
    let table = frame.table().expect("table should be visible");
    assert_eq!(table.rows.len(), 6);
    assert_eq!(table.rows[5].person_id, 6);
    match &frame.page {
        PageView::Table { count_label, .. } => assert_eq!(count_label, "Personen: 6 gefunden"),
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn edit_submit_updates_record_in_place() {
    let now = Instant::now();
    let mut controller = loaded_controller(now);

    let frame = controller.handle(UiEvent::OpenEditForm(2), now);
    let form = frame.form.expect("edit form should open");
    assert_eq!(form.first_name, "Max");
    assert_eq!(form.submit_label, "Aktualisieren");

    controller.handle(
        UiEvent::EditField(PersonField::LastName, "Neumann".to_string()),
        now,
    );
    let frame = controller.handle(UiEvent::SubmitForm, now);

    assert!(frame.form.is_none());
    assert_eq!(
        frame.notification.as_ref().expect("outcome banner should show").message,
        "Person \"Max Neumann\" wurde erfolgreich aktualisiert!"
    );
    let table = frame.table().expect("table should be visible");
    assert_eq!(table.rows[1].person_id, 2);
    assert_eq!(table.rows[1].last_name, "Neumann");
}

#[test]
fn open_edit_for_unknown_id_is_noop() {
    let now = Instant::now();
    let mut controller = loaded_controller(now);

    let frame = controller.handle(UiEvent::OpenEditForm(99), now);
    assert!(frame.form.is_none());
}

#[test]
fn delete_requires_confirmation() {
    let now = Instant::now();
    let mut controller = loaded_controller(now);

    let frame = controller.handle(UiEvent::RequestDelete(3), now);
    assert_eq!(
        frame.confirmation.as_deref(),
        Some("Möchten Sie \"Lisa Weber\" wirklich löschen?")
    );
    assert_eq!(controller.store().len(), 5);

    let frame = controller.handle(UiEvent::CancelDelete, now);
    assert!(frame.confirmation.is_none());
    assert_eq!(controller.store().len(), 5);

    controller.handle(UiEvent::RequestDelete(3), now);
    let frame = controller.handle(UiEvent::ConfirmDelete, now);
    assert!(frame.confirmation.is_none());
    assert_eq!(
        frame.notification.as_ref().expect("outcome banner should show").message,
        "Person \"Lisa Weber\" wurde erfolgreich gelöscht!"
    );
    assert_eq!(row_ids(&frame), vec![1, 2, 4, 5]);
}

#[test]
fn confirm_without_pending_deletion_does_nothing() {
    let now = Instant::now();
    let mut controller = loaded_controller(now);

    controller.handle(UiEvent::ConfirmDelete, now);
    assert_eq!(controller.store().len(), 5);
}

#[test]
fn banner_auto_dismisses_and_stale_dismiss_is_ignored() {
    let now = Instant::now();
    let mut controller = loaded_controller(now);
    let loaded_banner = controller.notification().expect("loaded banner should show").id;

    controller.handle(UiEvent::OpenCreateForm, now);
    let frame = controller.handle(UiEvent::SubmitForm, now);
    let error_banner = frame.notification.expect("error banner should show");
    assert_ne!(error_banner.id, loaded_banner);

    let frame = controller.handle(UiEvent::DismissNotification(loaded_banner), now);
    assert_eq!(frame.notification.expect("error banner should remain").id, error_banner.id);

    let frame = controller.tick(now + NOTIFICATION_TTL);
    assert!(frame.notification.is_none());
}

#[test]
fn startup_warning_becomes_first_banner() {
    let now = Instant::now();
    let controller = controller_with(MemoryKeyValueStore::with_entry(PERSONS_KEY, "42"), now);

    let banner = controller.notification().expect("startup banner should show");
    assert_eq!(banner.kind, NotificationKind::Info);
    assert!(banner.message.contains("sample data loaded"));
    assert_eq!(controller.store().len(), 5);
}

#[test]
fn frame_text_renders_table_and_banner() {
    let now = Instant::now();
    let mut controller = loaded_controller(now);
    let text = controller.tick(now + LOADING_DELAY).to_string();

    assert!(text.contains("Personen: 5 gefunden"));
    assert!(text.contains("Sarah"));
    assert!(text.contains("✅ Tabelle mit 5 Personen erfolgreich geladen!"));
}

#[test]
fn late_tick_does_not_show_expired_loaded_banner() {
    let now = Instant::now();
    let mut controller = controller_with(MemoryKeyValueStore::new(), now);
    controller.handle(UiEvent::BuildTable, now);

    let frame = controller.tick(now + LOADING_DELAY + NOTIFICATION_TTL + Duration::from_secs(1));
    assert_eq!(controller.page_state(), PageState::Table);
    assert!(frame.table().is_some());
    assert!(frame.notification.is_none());
}

#[test]
fn failed_save_on_submit_keeps_form_open() {
    let now = Instant::now();
    let mut controller = loaded_flaky_controller(now);

    controller.handle(UiEvent::OpenCreateForm, now);
    fill_form(&mut controller, now, ["Eva", "Klein", "01.01.2000"]);
    set_fail_writes(&controller, true);
    let frame = controller.handle(UiEvent::SubmitForm, now);

    let form = frame.form.as_ref().expect("form should stay open");
    assert_eq!(form.first_name, "Eva");
    let banner = frame.notification.as_ref().expect("error banner should show");
    assert_eq!(banner.kind, NotificationKind::Error);
    assert_eq!(row_ids(&frame), vec![1, 2, 3, 4, 5]);

    set_fail_writes(&controller, false);
    let frame = controller.handle(UiEvent::SubmitForm, now);
    assert!(frame.form.is_none());
    assert_eq!(row_ids(&frame), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn failed_save_on_edit_keeps_record_unchanged() {
    let now = Instant::now();
    let mut controller = loaded_flaky_controller(now);

    controller.handle(UiEvent::OpenEditForm(2), now);
    controller.handle(
        UiEvent::EditField(PersonField::LastName, "Neumann".to_string()),
        now,
    );
    set_fail_writes(&controller, true);
    let frame = controller.handle(UiEvent::SubmitForm, now);

    assert!(frame.form.is_some());
    let banner = frame.notification.as_ref().expect("error banner should show");
    assert_eq!(banner.kind, NotificationKind::Error);
    let table = frame.table().expect("table should be visible");
    assert_eq!(table.rows[1].last_name, "Schmidt");
}

#[test]
fn failed_save_on_delete_keeps_record() {
    let now = Instant::now();
    let mut controller = loaded_flaky_controller(now);

    controller.handle(UiEvent::RequestDelete(3), now);
    set_fail_writes(&controller, true);
    let frame = controller.handle(UiEvent::ConfirmDelete, now);

    assert!(frame.confirmation.is_none());
    let banner = frame.notification.as_ref().expect("error banner should show");
    assert_eq!(banner.kind, NotificationKind::Error);
    assert_eq!(row_ids(&frame), vec![1, 2, 3, 4, 5]);
    assert!(controller.store().find_by_id(3).is_some());
}
