use pitchbook_notify::config::NotifyConfig;
use pitchbook_notify::{ConfirmationSummary, NotifyClient};

fn summary() -> ConfirmationSummary {
    ConfirmationSummary {
        client_name: "Karim Benz".to_string(),
        client_email: "karim@example.com".to_string(),
        client_phone: None,
        pitch_name: "Terrain A".to_string(),
        pitch_kind: "5-a-side".to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        start_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        tariff: 60.0,
        status: "confirmée".to_string(),
    }
}

#[test]
fn test_gateway_disabled_without_url() {
    let config = NotifyConfig {
        api_url: None,
        api_key: Some("key".to_string()),
        from: Some("noreply@pitchbook.test".to_string()),
    };

    assert!(!config.is_enabled());
}

#[test]
fn test_gateway_enabled_with_url() {
    let config = NotifyConfig {
        api_url: Some("http://localhost:9999/confirmations".to_string()),
        api_key: None,
        from: None,
    };

    assert!(config.is_enabled());
}

#[tokio::test]
async fn test_disabled_gateway_reports_not_sent() {
    let client = NotifyClient::new(NotifyConfig::default());

    let report = client.send_confirmation(&summary()).await;

    assert!(!report.sent);
    assert!(report.message_id.is_none());
    assert!(report.error.is_some());
}
