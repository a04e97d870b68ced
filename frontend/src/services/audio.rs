use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use shared::scene::AudioLevel;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, HtmlAudioElement, MediaElementAudioSourceNode};

use crate::services::logging::Logger;

pub fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

/// Web Audio graph: audio element -> analyser -> speakers
pub struct AudioAnalyser {
    context: AudioContext,
    analyser: AnalyserNode,
    _source: MediaElementAudioSourceNode,
    bins: Vec<u8>,
}

impl AudioAnalyser {
    pub fn attach(audio: &HtmlAudioElement, fft_size: u32) -> Result<Self> {
        let context = AudioContext::new().map_err(js_error).context("Web Audio unavailable")?;
        let analyser = context.create_analyser().map_err(js_error).context("create analyser")?;
        analyser.set_fft_size(fft_size);

        let source = context
            .create_media_element_source(audio)
            .map_err(js_error)
            .context("create media element source")?;
        source
            .connect_with_audio_node(&analyser)
            .map_err(js_error)
            .context("connect source to analyser")?;
        analyser
            .connect_with_audio_node(&context.destination())
            .map_err(js_error)
            .context("connect analyser to destination")?;

        let bins = vec![0; analyser.frequency_bin_count() as usize];
        Ok(Self {
            context,
            analyser,
            _source: source,
            bins,
        })
    }

    pub fn sample(&mut self) -> AudioLevel {
        self.analyser.get_byte_frequency_data(&mut self.bins);
        AudioLevel::from_frequency_bins(&self.bins)
    }

    fn resume(&self) -> Result<()> {
        self.context.resume().map_err(js_error).context("resume audio context")?;
        Ok(())
    }
}

impl Drop for AudioAnalyser {
    fn drop(&mut self) {
        if let Err(e) = self.context.close() {
            Logger::debug_with_component("audio", &format!("Closing audio context failed: {:?}", e));
        }
    }
}

/// Shared, lazily attached analyser for one celebration page.
///
/// Until playback has started there is no graph and every sample is silent.
#[derive(Clone, Default)]
pub struct AudioHandle(Rc<RefCell<Option<AudioAnalyser>>>);

impl PartialEq for AudioHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl AudioHandle {
    /// Start playback, then route the element through the analyser.
    ///
    /// Fails when the browser blocks autoplay or Web Audio is missing.
    pub async fn play(&self, audio: &HtmlAudioElement, fft_size: u32) -> Result<()> {
        let promise = audio.play().map_err(js_error).context("audio.play() threw")?;
        JsFuture::from(promise)
            .await
            .map_err(js_error)
            .context("playback was not allowed")?;

        let mut slot = self.0.borrow_mut();
        if let Some(analyser) = slot.as_ref() {
            analyser.resume()?;
        } else {
            *slot = Some(AudioAnalyser::attach(audio, fft_size)?);
        }
        Ok(())
    }

    pub fn sample(&self) -> AudioLevel {
        match self.0.borrow_mut().as_mut() {
            Some(analyser) => analyser.sample(),
            None => AudioLevel::SILENT,
        }
    }
}
