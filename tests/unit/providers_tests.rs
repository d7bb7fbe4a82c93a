/*!
 * Tests for speech synthesizer implementations
 */

use anyhow::Result;

use pdfaudio::app_config::SynthesisConfig;
use pdfaudio::errors::ProviderError;
use pdfaudio::providers::google::{split_into_chunks, GoogleTts};
use pdfaudio::providers::mock::MockSpeechSynthesizer;
use pdfaudio::providers::SpeechSynthesizer;

#[test]
fn test_split_into_chunks_shouldRespectLimitAndKeepAllWords() {
    let text = "El veloz murciélago hindú comía feliz cardillo y kiwi. \
                La cigüeña tocaba el saxofón detrás del palenque de paja; \
                mientras tanto, el perro ladraba.";
    let chunks = split_into_chunks(text, 40);

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 40));
    let rejoined: Vec<&str> = chunks.iter().flat_map(|chunk| chunk.split_whitespace()).collect();
    let original: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(rejoined, original);
}

#[test]
fn test_split_into_chunks_withBlankText_shouldReturnNothing() {
    assert!(split_into_chunks(" \n\t ", 100).is_empty());
}

#[test]
fn test_google_from_config_shouldAcceptDefaults() -> Result<()> {
    let tts = GoogleTts::from_config(&SynthesisConfig::default())?;
    assert_eq!(tts.name(), "Google TTS");
    assert_eq!(tts.audio_extension(), "mp3");
    Ok(())
}

#[tokio::test]
async fn test_google_withUnreachableEndpoint_shouldReportConnectionError() -> Result<()> {
    // Port 9 on localhost is the discard service, normally closed
    let tts = GoogleTts::new("http://127.0.0.1:9/translate_tts", 2, 100, 1, 1)?;

    let err = tts.synthesize("Hola", "es").await.unwrap_err();
    assert!(matches!(err, ProviderError::ConnectionError(_)), "{:?}", err);
    Ok(())
}

#[tokio::test]
async fn test_mock_rateLimited_shouldReportQuota() {
    let mock = MockSpeechSynthesizer::rate_limited();
    let err = mock.synthesize("Hola", "es").await.unwrap_err();
    assert!(matches!(err, ProviderError::RateLimitExceeded(_)));
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_mock_requests_shouldBeRecordedInOrder() {
    let mock = MockSpeechSynthesizer::working();
    mock.synthesize("uno", "es").await.unwrap();
    mock.synthesize("two", "en").await.unwrap();

    let languages: Vec<String> = mock.requests().into_iter().map(|r| r.language_code).collect();
    assert_eq!(languages, vec!["es", "en"]);
}

#[test]
fn test_mock_intermittent_shouldFailEveryThirdRequest() {
    let mock = MockSpeechSynthesizer::intermittent(3);
    let outcomes: Vec<bool> = (0..6)
        .map(|i| tokio_test::block_on(mock.synthesize(&format!("frase {}", i), "ko")).is_ok())
        .collect();
    assert_eq!(outcomes, vec![true, true, false, true, true, false]);
}
