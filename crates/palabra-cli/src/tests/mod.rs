use std::collections::HashMap;
use std::sync::Mutex;

use palabra_translator::{
    Entry, FromWord, LanguageCode, ProviderMetadata, Section, ToWord, TranslateError, Translation,
    Translator,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

mod lookup_tests;

/// In-memory provider: known words, one word that fails, everything else not found
pub(crate) struct FakeTranslator {
    words: HashMap<String, Translation>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslator {
    pub fn new() -> Self {
        let mut words = HashMap::new();
        words.insert("house".to_string(), house());
        Self {
            words,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        word: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((word.to_string(), from, to));

        if word == "boom" {
            return Err(TranslateError::ApiError("HTTP 500 Internal Server Error".to_string()));
        }

        self.words
            .get(word)
            .cloned()
            .ok_or_else(|| TranslateError::not_found(word, "No English translation found"))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            homepage: String::new(),
        }
    }
}

pub(crate) fn house() -> Translation {
    Translation {
        word: "house".to_string(),
        from_lang: "en".to_string(),
        to_lang: "es".to_string(),
        url: "https://www.wordreference.com/enes/house".to_string(),
        translations: vec![Section {
            title: "Principal Translations".to_string(),
            entries: vec![
                Entry {
                    context: "building".to_string(),
                    from_word: FromWord {
                        source: "house".to_string(),
                        grammar: "n".to_string(),
                    },
                    to_word: vec![ToWord {
                        meaning: "casa".to_string(),
                        notes: String::new(),
                        grammar: "nf".to_string(),
                    }],
                    from_example: "They bought a house.".to_string(),
                    to_example: vec!["Compraron una casa.".to_string()],
                },
                Entry {
                    context: "contain".to_string(),
                    from_word: FromWord {
                        source: "house".to_string(),
                        grammar: "vtr".to_string(),
                    },
                    to_word: vec![ToWord {
                        meaning: "alojar".to_string(),
                        notes: String::new(),
                        grammar: "vtr".to_string(),
                    }],
                    from_example: String::new(),
                    to_example: vec![],
                },
            ],
        }],
    }
}

/// Serve one HTTP exchange with a canned JSON body; the handle yields the request body.
pub(crate) async fn serve_once(body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let url = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let request_body = loop {
            let n = socket.read(&mut chunk).await.expect("read");
            if n == 0 {
                break String::new();
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);

            let body_start = header_end + 4;
            if buf.len() >= body_start + content_length {
                break String::from_utf8_lossy(&buf[body_start..body_start + content_length])
                    .to_string();
            }
        };

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();

        request_body
    });

    (url, handle)
}
