// Device client implementation
//
// Each operation is one HTTP request against the device's /api endpoints.
// The returned future resolves when the device answers, not when the
// motor has finished moving.

use reqwest::{Client, RequestBuilder};
use tracing::{debug, error, warn};

use super::form::Form;
use crate::errors::{DeviceError, Result};
use crate::units;

/// Host used when none is given
pub const DEFAULT_HOST: &str = "webmo.local";

/// HTTP client for a single Webmo device
#[derive(Debug, Clone)]
pub struct DeviceClient {
    base_url: String,
    step_angle: f64,
    client: Client,
}

impl DeviceClient {
    /// Create a client for `host`, or for `webmo.local` when `None`.
    ///
    /// The host is not validated; a bad one shows up as a network error on
    /// the first request.
    pub fn new(host: Option<&str>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_http_client(host, client))
    }

    /// Create a client that sends requests through an existing reqwest client
    ///
    /// Use this to apply timeouts or proxies; the device client adds none.
    pub fn with_http_client(host: Option<&str>, client: Client) -> Self {
        let host = host.unwrap_or(DEFAULT_HOST);
        Self {
            base_url: format!("http://{}/api", host),
            step_angle: units::STEP_ANGLE,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Degrees per full motor step
    pub fn step_angle(&self) -> f64 {
        self.step_angle
    }

    /// Fetch the raw status payload
    pub async fn get_status(&self) -> Result<String> {
        let url = self.url("/status");
        debug!(url = %url, "GET");
        self.send(self.client.get(&url)).await
    }

    /// Start rotating until stopped. Without a speed the device uses its own default.
    pub async fn rotate(&self, speed: Option<f64>) -> Result<String> {
        let form = Form::new().maybe_number("speed", speed);
        self.post("/rotate/forever", form).await
    }

    /// Rotate to an absolute `position` interpreted within `abs_range`
    pub async fn rotate_to(
        &self,
        position: f64,
        abs_range: f64,
        speed: Option<f64>,
    ) -> Result<String> {
        let form = Form::new()
            .number("degree", position)
            .number("absRange", abs_range)
            .maybe_number("speed", speed)
            .flag("absolute", true);
        self.post("/rotate", form).await
    }

    /// Rotate by `degree` relative to the current position.
    ///
    /// Resolves once the device accepts the command. There is no way to tell
    /// from here whether the platform actually travelled the full angle (for
    /// example when it was blocked or held by hand).
    pub async fn rotate_by(&self, degree: f64, speed: Option<f64>) -> Result<String> {
        let form = Form::new()
            .number("degree", degree)
            .maybe_number("speed", speed);
        self.post("/rotate", form).await
    }

    pub async fn rotate_to_home(&self) -> Result<String> {
        self.post("/rotate/home", Form::new()).await
    }

    /// Stop the motor.
    ///
    /// `smooth` decelerates instead of stopping at once; `lock` keeps the motor
    /// energized afterwards. Both are always sent and default to `false`.
    pub async fn stop(&self, smooth: Option<bool>, lock: Option<bool>) -> Result<String> {
        let form = Form::new()
            .flag("smooth", smooth.unwrap_or(false))
            .flag("lock", lock.unwrap_or(false));
        self.post("/stop", form).await
    }

    /// Stop immediately. `lock` is not sent, so the firmware default applies.
    pub async fn stop_hard(&self) -> Result<String> {
        self.post("/stop", Form::new().flag("smooth", false)).await
    }

    /// Decelerate to a stop. `lock` is not sent, so the firmware default applies.
    pub async fn stop_soft(&self) -> Result<String> {
        self.post("/stop", Form::new().flag("smooth", true)).await
    }

    /// Make the current position the new home
    pub async fn reset_home(&self) -> Result<String> {
        self.post("/home/reset", Form::new()).await
    }

    pub fn angle_to_step(&self, angle: f64) -> f64 {
        units::angle_to_step(angle, self.step_angle)
    }

    pub fn step_to_angle(&self, step: f64) -> f64 {
        units::step_to_angle(step, self.step_angle)
    }

    pub fn speed_per_second_by_step(&self, step: f64) -> f64 {
        units::speed_per_second_by_step(step)
    }

    pub fn speed_per_second_by_angle(&self, angle: f64) -> f64 {
        units::speed_per_second_by_angle(angle, self.step_angle)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, form: Form) -> Result<String> {
        let url = self.url(path);
        debug!(url = %url, form = ?form, "POST");
        self.send(self.client.post(&url).form(&form)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await.map_err(|e| {
            error!("Device request failed: {}", e);
            if e.is_timeout() {
                error!("  → Error type: TIMEOUT");
            } else if e.is_connect() {
                error!("  → Error type: CONNECTION");
            } else if e.is_request() {
                error!("  → Error type: REQUEST");
            } else {
                error!("  → Error type: OTHER");
            }
            DeviceError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Device rejected request");
            return Err(DeviceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "Device responded");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_host() {
        let client = DeviceClient::new(None).unwrap();
        assert_eq!(client.base_url(), "http://webmo.local/api");
    }

    #[test]
    fn test_explicit_host() {
        let client = DeviceClient::new(Some("10.0.0.5")).unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5/api");
    }

    #[test]
    fn test_host_is_not_validated() {
        let client = DeviceClient::with_http_client(Some("not a host"), Client::new());
        assert_eq!(client.base_url(), "http://not a host/api");
    }

    #[test]
    fn test_step_angle_is_fixed() {
        let client = DeviceClient::new(None).unwrap();
        assert_eq!(client.step_angle(), 1.8);
        assert_eq!(client.angle_to_step(90.0), 50.0);
        assert_eq!(client.step_to_angle(128.0), 1.8);
    }

    #[test]
    fn test_speed_conversions_delegate() {
        let client = DeviceClient::new(None).unwrap();
        assert_eq!(client.speed_per_second_by_step(0.0), 0.0);
        assert_eq!(
            client.speed_per_second_by_angle(18.0),
            client.speed_per_second_by_step(10.0)
        );
    }
}
