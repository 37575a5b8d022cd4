//! Device gateway trait and its HTTP implementation

use std::time::Duration;

use ledgrid_core::prelude::{debug, trace};
use ledgrid_core::{Color, Coordinate, Error};
use reqwest::Client;
use url::Url;

use crate::error::DeviceError;
use crate::protocol::{self, DeviceMode, PixelQuery, LED_STATUS_PATH, SET_PIXEL_PATH};

/// Per-request timeout used when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Operations the LED device supports.
///
/// Implementations hold no grid state; callers own reconciliation.
#[trait_variant::make(DeviceGateway: Send)]
pub trait LocalDeviceGateway {
    /// Set one LED. Succeeds only on a 2xx answer. Never retried.
    async fn set_pixel(&self, coord: Coordinate, color: Color) -> Result<(), DeviceError>;

    /// Fetch every LED as a row-major sequence of `size * size` colors.
    async fn fetch_status(&self) -> Result<Vec<Color>, DeviceError>;

    /// Start or stop a device-side display mode.
    async fn set_mode(&self, mode: DeviceMode) -> Result<(), DeviceError>;
}

/// Gateway speaking the device's plain HTTP GET protocol
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    grid_size: usize,
}

impl HttpGateway {
    /// Create a gateway for the device at `base_url`.
    ///
    /// `timeout` bounds every request from connect to last body byte.
    pub fn new(base_url: &str, timeout: Duration, grid_size: usize) -> ledgrid_core::Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!(
            "Device gateway at {} (timeout {:?}, {}x{} grid)",
            base_url, timeout, grid_size, grid_size
        );

        Ok(Self {
            client,
            base_url,
            grid_size,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    fn endpoint(&self, path: &str) -> Result<Url, DeviceError> {
        self.base_url
            .join(path)
            .map_err(|e| DeviceError::unreachable(format!("invalid endpoint {path}: {e}")))
    }

    async fn get(
        &self,
        path: &str,
        query: Option<&PixelQuery>,
    ) -> Result<reqwest::Response, DeviceError> {
        let url = self.endpoint(path)?;
        let mut request = self.client.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await.map_err(DeviceError::from_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeviceError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl DeviceGateway for HttpGateway {
    async fn set_pixel(&self, coord: Coordinate, color: Color) -> Result<(), DeviceError> {
        let query = PixelQuery::new(coord, color);
        trace!("set_pixel {} -> {}", coord, color);
        self.get(SET_PIXEL_PATH, Some(&query)).await?;
        Ok(())
    }

    async fn fetch_status(&self) -> Result<Vec<Color>, DeviceError> {
        let response = self.get(LED_STATUS_PATH, None).await?;
        let body = response.text().await.map_err(DeviceError::from_transport)?;
        protocol::decode_status(&body, self.grid_size * self.grid_size)
    }

    async fn set_mode(&self, mode: DeviceMode) -> Result<(), DeviceError> {
        debug!("set_mode {} ({})", mode, mode.path());
        self.get(mode.path(), None).await?;
        Ok(())
    }
}

/// Parse the device URL and make sure relative joins land under it.
///
/// A missing scheme is treated as `http://`.
pub fn normalize_base_url(raw: &str) -> ledgrid_core::Result<Url> {
    let raw = raw.trim();
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    let mut url = Url::parse(&with_scheme)
        .map_err(|e| Error::config(format!("Invalid device URL {:?}: {}", raw, e)))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Device URL must be http(s): {:?}",
            raw
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_base_url, Color, Coordinate, DeviceError, DeviceGateway, DeviceMode, Duration,
        HttpGateway, DEFAULT_REQUEST_TIMEOUT, SET_PIXEL_PATH,
    };

    #[test]
    fn test_normalize_adds_scheme_and_slash() {
        let url = normalize_base_url("192.168.4.1").unwrap();
        assert_eq!(url.as_str(), "http://192.168.4.1/");
    }

    #[test]
    fn test_normalize_keeps_path_prefix() {
        let url = normalize_base_url("http://relay.local:3000/led").unwrap();
        assert_eq!(url.as_str(), "http://relay.local:3000/led/");
        assert_eq!(
            url.join(SET_PIXEL_PATH).unwrap().as_str(),
            "http://relay.local:3000/led/set_pixel"
        );
    }

    #[test]
    fn test_normalize_rejects_other_schemes() {
        assert!(normalize_base_url("ftp://device").is_err());
        assert!(normalize_base_url("http://").is_err());
    }

    #[test]
    fn test_gateway_endpoints() {
        let gw = HttpGateway::new("http://10.0.0.2", DEFAULT_REQUEST_TIMEOUT, 8).unwrap();
        assert_eq!(
            gw.endpoint(DeviceMode::Off.path()).unwrap().as_str(),
            "http://10.0.0.2/desactivar-modo-show-1"
        );
        assert_eq!(gw.grid_size(), 8);
    }

    #[tokio::test]
    async fn test_unreachable_device() {
        // Port 9 on localhost (discard) is closed on test machines
        let gw = HttpGateway::new("http://127.0.0.1:9", Duration::from_millis(500), 8).unwrap();
        let err = gw
            .set_pixel(Coordinate::new(0, 0), Color::WHITE)
            .await
            .unwrap_err();
        assert!(matches!(err, DeviceError::Unreachable(_)));
    }
}
