//! Intro carousel with the word-by-word typing reveal.
//!
//! Each slide's copy is revealed one word at a time as `intro.typing`
//! notifications; advancing restarts the ticker for the new slide and the
//! previous ticker is cancelled. The last slide's button leaves for the
//! sign-in screen.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::audio::AudioSession;
use crate::ipc::event::EventBroadcaster;
use crate::nav::{NavStack, Screen};

pub const SLIDES: [&str; 3] = [
    "Welcome to Zynko , a gamified education platform to help students",
    "Earn points and unlock rewards while learning every day!",
    "Track your progress and challenge friends to grow together.",
];

/// What `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the slide with this index.
    Slide(usize),
    /// Was on the last slide — navigated to SignIn.
    Finished,
}

pub struct IntroCarousel {
    index: Mutex<usize>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    typing_interval: Duration,
    nav: Arc<NavStack>,
    audio: Arc<AudioSession>,
    broadcaster: Arc<EventBroadcaster>,
}

impl IntroCarousel {
    pub fn new(
        nav: Arc<NavStack>,
        audio: Arc<AudioSession>,
        broadcaster: Arc<EventBroadcaster>,
        typing_interval: Duration,
    ) -> Self {
        Self {
            index: Mutex::new(0),
            ticker: Mutex::new(None),
            typing_interval,
            nav,
            audio,
            broadcaster,
        }
    }

    pub fn current_index(&self) -> usize {
        *self.index.lock().expect("intro index poisoned")
    }

    /// Called when the shell mounts the intro screen: starts the
    /// background track and the typing ticker for the first slide.
    pub fn begin(&self) {
        self.audio.start();
        *self.index.lock().expect("intro index poisoned") = 0;
        self.announce_slide(0);
    }

    /// The Next/Start button.
    pub fn advance(&self) -> AdvanceOutcome {
        self.audio.play_click();
        let next = {
            let mut index = self.index.lock().expect("intro index poisoned");
            if *index >= SLIDES.len() - 1 {
                None
            } else {
                *index += 1;
                Some(*index)
            }
        };
        match next {
            Some(index) => {
                self.announce_slide(index);
                AdvanceOutcome::Slide(index)
            }
            None => {
                self.stop_ticker();
                self.nav.push(Screen::SignIn);
                AdvanceOutcome::Finished
            }
        }
    }

    /// Cancel the running ticker, if any.
    pub fn stop_ticker(&self) {
        if let Some(handle) = self.ticker.lock().expect("intro ticker poisoned").take() {
            handle.abort();
        }
    }

    fn announce_slide(&self, index: usize) {
        let text = SLIDES[index];
        self.broadcaster.broadcast(
            "intro.slide",
            serde_json::json!({ "index": index, "count": SLIDES.len(), "text": text }),
        );
        self.restart_ticker(index, text);
    }

    fn restart_ticker(&self, slide: usize, text: &'static str) {
        let broadcaster = self.broadcaster.clone();
        let interval = self.typing_interval;
        let handle = tokio::spawn(async move {
            let words: Vec<&str> = text.split(' ').collect();
            for revealed in 1..=words.len() {
                sleep(interval).await;
                broadcaster.broadcast(
                    "intro.typing",
                    serde_json::json!({
                        "slide": slide,
                        "words": revealed,
                        "text": words[..revealed].join(" "),
                    }),
                );
            }
        });
        if let Some(old) = self
            .ticker
            .lock()
            .expect("intro ticker poisoned")
            .replace(handle)
        {
            old.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn carousel(b: Arc<EventBroadcaster>) -> IntroCarousel {
        let nav = Arc::new(NavStack::new(b.clone()));
        let audio = Arc::new(AudioSession::new(
            b.clone(),
            "gamebackground1".into(),
            "buttonclick".into(),
        ));
        IntroCarousel::new(nav, audio, b, Duration::from_millis(300))
    }

    #[tokio::test(start_paused = true)]
    async fn typing_reveals_word_by_word() {
        let b = Arc::new(EventBroadcaster::new());
        let intro = carousel(b.clone());
        let mut rx = b.subscribe();
        intro.begin();

        // audio.background, then intro.slide
        let _ = rx.recv().await.unwrap();
        let slide: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(slide["method"], "intro.slide");
        assert_eq!(slide["params"]["index"], 0);

        let word_count = SLIDES[0].split(' ').count();
        let mut last_text = String::new();
        for expected in 1..=word_count {
            let tick: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
            assert_eq!(tick["method"], "intro.typing");
            assert_eq!(tick["params"]["words"], expected);
            last_text = tick["params"]["text"].as_str().unwrap().to_string();
        }
        // Last tick carries the whole sentence
        assert_eq!(last_text, SLIDES[0]);
        assert_eq!(intro.current_index(), 0);
        intro.stop_ticker();
    }

    #[tokio::test(start_paused = true)]
    async fn advancing_past_last_slide_navigates_to_sign_in() {
        let b = Arc::new(EventBroadcaster::new());
        let intro = carousel(b.clone());
        intro.begin();
        assert_eq!(intro.advance(), AdvanceOutcome::Slide(1));
        assert_eq!(intro.advance(), AdvanceOutcome::Slide(2));
        assert_eq!(intro.advance(), AdvanceOutcome::Finished);
        // Further taps keep navigating, never panic past the end
        assert_eq!(intro.advance(), AdvanceOutcome::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn advance_restarts_typing_for_new_slide() {
        let b = Arc::new(EventBroadcaster::new());
        let intro = carousel(b.clone());
        intro.begin();
        let mut rx = b.subscribe();
        intro.advance();
        // click, slide announcement, then ticks for slide 1 only
        loop {
            let ev: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
            if ev["method"] == "intro.typing" {
                assert_eq!(ev["params"]["slide"], 1);
                break;
            }
        }
        intro.stop_ticker();
    }
}
