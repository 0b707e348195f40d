#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use sozluk::{
    Dictionary, FetchError, RetryConfig, SozlukConfig, Transport, TransportResponse,
};

pub const BASE_URL: &str = "http://dictionary.test";

/// In-memory stand-in for the dictionary service.
///
/// Routes are keyed by `path` or `path?term`; the more specific key wins.
/// Unknown routes answer with the service's "no result" object.
#[derive(Default)]
pub struct FakeService {
    routes: Mutex<HashMap<String, Value>>,
    down: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, key: &str, body: Value) {
        self.routes.lock().unwrap().insert(key.to_string(), body);
    }

    pub fn take_down(&self, path: &str) {
        self.down.lock().unwrap().insert(path.to_string());
    }

    pub fn bring_up(&self, path: &str) {
        self.down.lock().unwrap().remove(path);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeService {
    async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, FetchError> {
        self.calls.lock().unwrap().push(path.to_string());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.down.lock().unwrap().contains(path) {
            return Err(FetchError::Transport("connection refused".into()));
        }

        let term = params
            .iter()
            .find(|(name, _)| name == "ara")
            .map(|(_, value)| value.as_str())
            .unwrap_or("");
        let routes = self.routes.lock().unwrap();
        let body = routes
            .get(&format!("{path}?{term}"))
            .or_else(|| routes.get(path))
            .cloned()
            .unwrap_or_else(|| json!({"error": "Sonuç bulunamadı"}));
        Ok(TransportResponse::ok(body.to_string()))
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }
}

/// Fast retries so failing legs settle quickly.
pub fn test_config() -> SozlukConfig {
    let mut config = SozlukConfig::default();
    config.retry = RetryConfig::default()
        .with_max_retries(1)
        .with_base_delay(Duration::from_millis(1))
        .with_max_delay(Duration::from_millis(1));
    config.transport.timeout = Duration::from_millis(500);
    config
}

pub fn dictionary(service: &Arc<FakeService>, config: &SozlukConfig) -> Dictionary {
    let transport: Arc<dyn Transport> = service.clone();
    Dictionary::with_transport(config, transport)
}

/// A service that knows "merhaba" and "kalem" plus a candidate pool.
pub fn seeded_service() -> Arc<FakeService> {
    let service = FakeService::new();
    service.route(
        "/gts?merhaba",
        json!([{
            "madde": "merhaba",
            "lisan": "Arapça marḥaba",
            "cogul_mu": "0",
            "ozel_mi": "0",
            "anlamlarListe": [{
                "anlam_sira": "1",
                "anlam": "Selam, günaydın",
                "ozelliklerListe": [{"tam_adi": "ünlem"}],
                "orneklerListe": [{"ornek": "Merhaba, nasılsınız?"}]
            }]
        }]),
    );
    service.route(
        "/gts?kalem",
        json!([{
            "madde": "kalem",
            "lisan": "Arapça ḳalem",
            "birlesikler": "kurşun kalem, dolma kalem",
            "anlamlarListe": [
                {"anlam_sira": "1", "anlam": "Yazı yazmaya yarayan araç", "ozelliklerListe": [{"tam_adi": "isim"}]},
                {"anlam_sira": "2", "anlam": "Resmî dairelerde yazı işleri bürosu"}
            ]
        }]),
    );
    service.route(
        "/atasozu?kalem",
        json!([
            {"sozum": "kalem kılıçtan keskindir", "anlami": "Yazı silahtan etkilidir", "turu2": "Atasözü"},
            {"sozum": "kalem oynatmak", "turu2": "Deyim"}
        ]),
    );
    service.route("/terim?kalem", json!([{"madde": "kalem", "anlam": "Bir yazı aracı"}]));
    service.route("/kilavuz?kalem", json!([{"sozu": "kalem"}]));
    service.route("/yazim?kalem", json!([{"sozu": "kalem", "seskod": "k0412"}]));
    service.route("/gts?kitap", json!([{"madde": "kitap"}]));
    service.route(
        "/autocomplete.json",
        json!([
            {"madde": "Abartı"}, {"madde": "abla"}, {"madde": "acele"}, {"madde": "açık"},
            {"madde": "ada"}, {"madde": "adım"}, {"madde": "ağaç"}, {"madde": "ağız"},
            {"madde": "ahenk"}, {"madde": "akşam"}, {"madde": "alev"}, {"madde": "anne"},
            {"madde": "kitap"}, {"madde": "katap"}, {"madde": "kiitap"}, {"madde": "kalıp"},
            {"madde": "kalem"}, {"madde": "kap"}, {"madde": "sevgi"}, {"madde": "sevgili"},
            {"madde": "sevinç"}, {"madde": "sergi"}, {"madde": "ışık"}, {"madde": "ılık"},
            {"madde": "abla"}
        ]),
    );
    service.route(
        "/icerik",
        json!({"kelime": [{"madde": "nazende", "anlam": "Nazlı, narin"}], "atasozu": []}),
    );
    service
}
