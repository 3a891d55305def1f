//! Test utilities for CLI testing
//!
//! Provides an in-process mock of the modpanel server.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use modpanel_core::api::{
    AboutResponse, DeviceResponse, ErrorResponse, HealthResponse, ModeResponse,
    ModeUpdateRequest, ModeUpdateResponse, RootResponse,
};
use modpanel_core::{DeviceInfo, Mode, ModeStatus, ModuleIdentity};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Mock server state
#[derive(Debug)]
struct MockState {
    mode: ModeStatus,
    fail_writes: bool,
    mode_posts: usize,
}

type Shared = Arc<Mutex<MockState>>;

/// Running mock server bound to a random loopback port
pub struct MockServer {
    pub url: String,
    state: Shared,
}

impl MockServer {
    /// Start the server in the background; it lives until the runtime ends
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState {
            mode: ModeStatus::Otomatis,
            fail_writes: false,
            mode_posts: 0,
        }));

        let app = Router::new()
            .route("/", get(root))
            .route("/api/device", get(device))
            .route("/api/mode", get(get_mode).post(set_mode))
            .route("/api/about", get(about))
            .route("/test", get(health))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// Make every subsequent mode write fail with 500
    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }

    /// Number of `POST /api/mode` requests received
    pub fn mode_posts(&self) -> usize {
        self.state.lock().unwrap().mode_posts
    }
}

const CONFIG_PATH: &str = "/data/adb/modules/YourModule/config.conf";

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "WebUI Magisk Module Controller Backend".to_string(),
    })
}

async fn device() -> Json<DeviceResponse> {
    Json(DeviceResponse::from(DeviceInfo {
        model: "Pixel 7".to_string(),
        board: "panther".to_string(),
        brand: "Google".to_string(),
        android: "14".to_string(),
        kernel: "5.10.157-android13".to_string(),
        cpu: "gs201".to_string(),
        ram: "7823412 kB".to_string(),
    }))
}

async fn get_mode(State(state): State<Shared>) -> Json<ModeResponse> {
    Json(ModeResponse {
        mode: state.lock().unwrap().mode,
        config_path: CONFIG_PATH.to_string(),
    })
}

async fn set_mode(State(state): State<Shared>, Json(request): Json<ModeUpdateRequest>) -> Response {
    let mut state = state.lock().unwrap();
    state.mode_posts += 1;

    let Ok(mode) = Mode::normalize(&request.mode) else {
        return error(StatusCode::BAD_REQUEST, "Mode harus 'otomatis' atau 'statis'");
    };
    if state.fail_writes {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Gagal menulis file konfigurasi. Pastikan perangkat sudah root dan path benar.",
        );
    }

    state.mode = mode.into();
    Json(ModeUpdateResponse {
        ok: true,
        mode: mode.to_string(),
    })
    .into_response()
}

async fn about() -> Json<AboutResponse> {
    Json(AboutResponse::from(&ModuleIdentity::default()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        backend: "✅ Running".to_string(),
    })
}

fn error(status: StatusCode, detail: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}
