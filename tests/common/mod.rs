#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use office_booking::adapters::{InMemoryBookingRepository, InMemoryOfficeSpaceRepository};
use office_booking::domain::{BookingFields, BookingTransaction, City, NewBooking, OfficeSpace};
use office_booking::health::HealthChecker;
use office_booking::middleware::auth::AdminApiKey;
use office_booking::middleware::request_logger::RequestLogSettings;
use office_booking::notifications::{
    MessageSender, MessagingError, NotificationDispatcher, OutboundMessage, SenderIds,
};
use office_booking::ports::BookingRepository;
use office_booking::{create_app, AppState};

pub const ADMIN_KEY: &str = "test-admin-key";

/// Records every message; optionally fails every send.
#[derive(Default)]
pub struct MockSender {
    pub sent: Mutex<Vec<OutboundMessage>>,
    pub fail: bool,
}

impl MockSender {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MessageSender for MockSender {
    async fn send(&self, message: &OutboundMessage) -> Result<String, MessagingError> {
        self.sent.lock().await.push(message.clone());
        if self.fail {
            return Err(MessagingError::Rejected {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }
        Ok(format!("SM{:032}", self.sent.lock().await.len()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub bookings: InMemoryBookingRepository,
    pub sender: Arc<MockSender>,
}

pub fn offices() -> Vec<OfficeSpace> {
    let jakarta = City {
        id: 1,
        name: "Jakarta".to_string(),
        slug: "jakarta".to_string(),
    };
    let bandung = City {
        id: 2,
        name: "Bandung".to_string(),
        slug: "bandung".to_string(),
    };

    vec![
        OfficeSpace {
            id: 1,
            name: "Sudirman Hub".to_string(),
            slug: "sudirman-hub".to_string(),
            address: "Jl. Jend. Sudirman Kav. 52".to_string(),
            about: "Private offices in SCBD".to_string(),
            price: 3_500_000,
            duration: 30,
            city: jakarta,
        },
        OfficeSpace {
            id: 2,
            name: "Braga Works".to_string(),
            slug: "braga-works".to_string(),
            address: "Jl. Braga 10".to_string(),
            about: "Heritage building coworking".to_string(),
            price: 900_000,
            duration: 10,
            city: bandung,
        },
    ]
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_sender(MockSender::default())
    }

    pub fn with_sender(sender: MockSender) -> Self {
        let sender = Arc::new(sender);
        let notifier = NotificationDispatcher::new(
            sender.clone(),
            SenderIds {
                sms_from: "+15005550006".to_string(),
                whatsapp_from: Some("+14155238886".to_string()),
            },
            Some("+62 21 555 0100".to_string()),
        );
        Self::build(notifier, sender)
    }

    pub fn without_messaging() -> Self {
        Self::build(NotificationDispatcher::disabled(), Arc::new(MockSender::default()))
    }

    fn build(notifier: NotificationDispatcher, sender: Arc<MockSender>) -> Self {
        let bookings = InMemoryBookingRepository::new();
        let state = AppState {
            bookings: Arc::new(bookings.clone()),
            offices: Arc::new(InMemoryOfficeSpaceRepository::with_offices(offices())),
            notifier,
            health: HealthChecker::new(),
            admin_api_key: AdminApiKey::new(ADMIN_KEY),
            request_log: RequestLogSettings { log_body: true },
        };

        Self {
            router: create_app(state),
            bookings,
            sender,
        }
    }

    /// Inserts a booking directly, bypassing code generation.
    pub async fn seed_booking(&self, code: &str, phone: &str, office_id: i64) -> BookingTransaction {
        let office = offices()
            .into_iter()
            .find(|office| office.id == office_id)
            .expect("unknown office fixture");
        let started_at = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let booking = NewBooking {
            booking_trx_id: code.to_string(),
            fields: BookingFields {
                name: "Siti".to_string(),
                phone_number: phone.to_string(),
                total_amount: office.price,
                duration: office.duration,
                started_at,
                ended_at: office_booking::domain::booking::end_date(started_at, office.duration)
                    .unwrap(),
                office_space_id: office.id,
            },
        };
        self.bookings.insert(&booking).await.unwrap()
    }

    /// Inserts a booking whose office space is not in the catalog.
    pub async fn seed_orphan_booking(&self, code: &str, phone: &str) -> BookingTransaction {
        let started_at = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let booking = NewBooking {
            booking_trx_id: code.to_string(),
            fields: BookingFields {
                name: "Siti".to_string(),
                phone_number: phone.to_string(),
                total_amount: 1_000_000,
                duration: 5,
                started_at,
                ended_at: NaiveDate::from_ymd_opt(2024, 7, 6).unwrap(),
                office_space_id: 99,
            },
        };
        self.bookings.insert(&booking).await.unwrap()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        admin: bool,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if admin {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_KEY));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body), false).await
    }
}
