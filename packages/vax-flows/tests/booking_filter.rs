//! Doctor → vaccine filter behavior.

use chrono::NaiveDate;
use vax_flows::testing::{vaccine, BackendCall, ScriptedBackend};
use vax_flows::{BookingForm, FlowError, VaccineFilter};

fn backend() -> ScriptedBackend {
    ScriptedBackend::new()
        .with_vaccines(1, vec![vaccine(10, "Covishield"), vaccine(11, "Covaxin")])
        .with_vaccines(2, vec![vaccine(20, "Hepatitis B")])
        .failing_doctor(3)
}

#[tokio::test]
async fn test_selecting_doctor_loads_vaccines() {
    let backend = backend();
    let mut filter = VaccineFilter::new(backend.clone());
    assert_eq!(filter.placeholder(), "Select Doctor First");

    filter.select_doctor(Some(1)).await;
    assert_eq!(filter.doctor_id(), Some(1));
    let names: Vec<_> = filter.vaccines().iter().map(|v| v.vaccine_name.as_str()).collect();
    assert_eq!(names, vec!["Covishield", "Covaxin"]);
    assert_eq!(filter.placeholder(), "Select Vaccine");
    assert_eq!(
        backend.calls(),
        vec![BackendCall::VaccinesForDoctor { doctor_id: 1 }]
    );
}

#[tokio::test]
async fn test_changing_doctor_clears_vaccine_selection() {
    let mut filter = VaccineFilter::new(backend());

    filter.select_doctor(Some(1)).await;
    filter.select_vaccine(Some(11)).unwrap();
    assert_eq!(filter.selected_vaccine().map(|v| v.id), Some(11));

    filter.select_doctor(Some(2)).await;
    assert_eq!(filter.vaccine_id(), None);
    assert_eq!(filter.vaccines().len(), 1);

    // Reselecting the same doctor also clears it.
    filter.select_vaccine(Some(20)).unwrap();
    filter.select_doctor(Some(2)).await;
    assert_eq!(filter.vaccine_id(), None);
}

#[tokio::test]
async fn test_vaccine_must_be_offered_by_doctor() {
    let mut filter = VaccineFilter::new(backend());
    filter.select_doctor(Some(2)).await;

    assert_eq!(
        filter.select_vaccine(Some(10)),
        Err(FlowError::NotOffered { vaccine_id: 10 })
    );
    assert_eq!(filter.vaccine_id(), None);
}

#[tokio::test]
async fn test_failed_fetch_gives_empty_list() {
    let mut filter = VaccineFilter::new(backend());
    filter.select_doctor(Some(1)).await;
    filter.select_doctor(Some(3)).await;

    assert_eq!(filter.doctor_id(), Some(3));
    assert!(filter.vaccines().is_empty());
    assert_eq!(filter.placeholder(), "No Vaccines assigned to this Doctor");
}

#[tokio::test]
async fn test_clearing_doctor_skips_fetch() {
    let backend = backend();
    let mut filter = VaccineFilter::new(backend.clone());
    filter.select_doctor(Some(1)).await;
    filter.select_doctor(None).await;

    assert!(filter.vaccines().is_empty());
    assert_eq!(filter.doctor_id(), None);
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_booking_form_takes_filter_selection() {
    let mut filter = VaccineFilter::new(backend());
    filter.select_doctor(Some(1)).await;
    filter.select_vaccine(Some(10)).unwrap();

    let form = BookingForm {
        user_id: Some(5),
        date: NaiveDate::from_ymd_opt(2026, 11, 2),
        time: "14:30".into(),
        ..BookingForm::default()
    }
    .with_selection(&filter);

    let request = form.to_request().expect("form should be complete");
    assert_eq!(request.doc_id, 1);
    assert_eq!(request.vaccine_id, 10);
    assert_eq!(request.appointment_time.to_string(), "14:30:00");
}
