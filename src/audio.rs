use crate::constants::{AUDIO_CONTAINER_CLASS, AUDIO_MIME, DEBUG_OVERLAY};
use crate::core::{
    AudioError, AudioSession, Disposer, Pending, PlayerSink, TimeDomainSource, FFT_SIZE,
};
use crate::debug_bars::DebugBars;
use crate::dom;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// WebAudio analysis graph: media element source → analyser → destination.
pub struct WebAnalyser {
    ctx: web::AudioContext,
    _source: web::MediaElementAudioSourceNode,
    analyser: web::AnalyserNode,
}

impl WebAnalyser {
    pub fn open(audio: &web::HtmlAudioElement) -> Result<Self, AudioError> {
        let err = |e: wasm_bindgen::JsValue| AudioError::Context(format!("{:?}", e));
        let ctx = web::AudioContext::new().map_err(err)?;
        let graph = (|| -> Result<_, AudioError> {
            let source = ctx.create_media_element_source(audio).map_err(err)?;
            let analyser = web::AnalyserNode::new(&ctx).map_err(err)?;
            analyser.set_fft_size(FFT_SIZE);
            source.connect_with_audio_node(&analyser).map_err(err)?;
            analyser
                .connect_with_audio_node(&ctx.destination())
                .map_err(err)?;
            Ok((source, analyser))
        })();
        match graph {
            Ok((source, analyser)) => Ok(Self {
                ctx,
                _source: source,
                analyser,
            }),
            Err(e) => {
                _ = ctx.close();
                Err(e)
            }
        }
    }
}

impl TimeDomainSource for WebAnalyser {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn read_time_domain(&self, out: &mut [u8]) {
        self.analyser.get_byte_time_domain_data(out);
    }

    fn close(&mut self) {
        _ = self.analyser.disconnect();
        _ = self.ctx.close();
    }
}

struct PendingRead {
    reader: web::FileReader,
    _onload: Closure<dyn FnMut()>,
}

struct Inner<K> {
    mount: web::HtmlElement,
    container: web::HtmlElement,
    input: web::HtmlInputElement,
    audio: Option<web::HtmlAudioElement>,
    session: AudioSession<WebAnalyser, K>,
    listeners: Disposer,
    pending: Pending<PendingRead>,
    debug_bars: Option<DebugBars>,
    destroyed: bool,
}

/// File picker, playback element and analysis sampling.
///
/// Emits intensity updates and play/pause into the sink `K`.
pub struct AudioController<K> {
    inner: Rc<RefCell<Inner<K>>>,
}

impl<K: PlayerSink + 'static> AudioController<K> {
    pub fn new(mount: &web::HtmlElement, sink: K) -> anyhow::Result<Self> {
        let document = dom::document()?;
        let container: web::HtmlElement = dom::create(&document, "div")?;
        _ = container.class_list().add_1(AUDIO_CONTAINER_CLASS);
        mount
            .append_child(&container)
            .map_err(|e| anyhow::anyhow!("append audio container: {:?}", e))?;

        let input: web::HtmlInputElement = dom::create(&document, "input")?;
        input.set_type("file");
        input.set_accept(AUDIO_MIME);
        _ = container.append_child(&input);

        let inner = Rc::new(RefCell::new(Inner {
            mount: mount.clone(),
            container,
            input: input.clone(),
            audio: None,
            session: AudioSession::new(sink),
            listeners: Disposer::new(),
            pending: Pending::new(),
            debug_bars: None,
            destroyed: false,
        }));

        let weak = Rc::downgrade(&inner);
        let picker = input.clone();
        let listener = dom::listen(&input, "change", move |_| {
            let file = picker.files().and_then(|files| files.get(0));
            select_file(&weak, file.as_ref());
        });
        inner.borrow_mut().listeners.push(move || listener.remove());

        Ok(Self { inner })
    }

    /// Load `file` and start playing it. `None` is ignored.
    pub fn select_file(&self, file: Option<&web::File>) {
        select_file(&Rc::downgrade(&self.inner), file);
    }

    /// Remove the playback element and every listener, close the analysis
    /// graph and the debug overlay. Later calls do nothing.
    pub fn destroy(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.destroyed {
            return;
        }
        inner.destroyed = true;
        if let Some(pending) = inner.pending.settle() {
            pending.reader.set_onload(None);
        }
        inner.listeners.dispose();
        if let Some(audio) = inner.audio.take() {
            _ = audio.pause();
            audio.remove();
        }
        inner.container.remove();
        inner.session.close();
        if let Some(mut bars) = inner.debug_bars.take() {
            bars.destroy();
        }
        log::info!("[audio] destroyed");
    }
}

fn select_file<K: PlayerSink + 'static>(weak: &Weak<RefCell<Inner<K>>>, file: Option<&web::File>) {
    let (Some(inner), Some(file)) = (weak.upgrade(), file) else {
        return;
    };
    if inner.borrow().destroyed {
        return;
    }
    let reader = match web::FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::warn!("[audio] FileReader unavailable: {:?}", e);
            return;
        }
    };

    let weak_load = weak.clone();
    let reader_load = reader.clone();
    let onload = Closure::wrap(Box::new(move || {
        let src = reader_load.result().ok().and_then(|r| r.as_string());
        match (weak_load.upgrade(), src) {
            (Some(inner), Some(src)) => create_audio(&inner, &src),
            (_, None) => log::warn!("[audio] file read produced no data"),
            _ => {}
        }
    }) as Box<dyn FnMut()>);
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    if let Err(e) = reader.read_as_data_url(file) {
        log::warn!("[audio] could not read {}: {:?}", file.name(), e);
        return;
    }
    log::info!("[audio] loading {}", file.name());

    let mut inner = inner.borrow_mut();
    if let Some(prev) = inner.pending.arm(PendingRead {
        reader,
        _onload: onload,
    }) {
        prev.reader.set_onload(None);
        dom::drop_later(prev);
    }
}

fn create_audio<K: PlayerSink + 'static>(inner_rc: &Rc<RefCell<Inner<K>>>, src: &str) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let mut guard = inner_rc.borrow_mut();
    let inner = &mut *guard;
    if inner.destroyed || inner.audio.is_some() {
        return;
    }
    let (audio, source) = match (
        dom::create::<web::HtmlAudioElement>(&document, "audio"),
        dom::create::<web::HtmlSourceElement>(&document, "source"),
    ) {
        (Ok(a), Ok(s)) => (a, s),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("[audio] {:?}", e);
            return;
        }
    };

    inner.input.remove();
    audio.set_controls(true);
    source.set_src(src);
    source.set_type(AUDIO_MIME);
    _ = audio.append_child(&source);
    _ = inner.container.append_child(&audio);
    inner.session.attach_media();
    // Load finished; the reader's onload is still on the stack
    if let Some(done) = inner.pending.settle() {
        done.reader.set_onload(None);
        dom::drop_later(done);
    }

    let weak = Rc::downgrade(inner_rc);
    let media = audio.clone();
    let on_play = dom::listen(&audio, "play", move |_| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut guard = inner.borrow_mut();
        let inner = &mut *guard;
        let created = inner.session.handle_play(|| WebAnalyser::open(&media));
        if created && DEBUG_OVERLAY {
            match DebugBars::new(&inner.mount) {
                Ok(bars) => inner.debug_bars = Some(bars),
                Err(e) => log::warn!("[audio] debug overlay unavailable: {:?}", e),
            }
        }
    });
    inner.listeners.push(move || on_play.remove());

    let weak = Rc::downgrade(inner_rc);
    let on_time = dom::listen(&audio, "timeupdate", move |_| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut guard = inner.borrow_mut();
        let Inner {
            session,
            debug_bars,
            ..
        } = &mut *guard;
        if let (Some(snapshot), Some(bars)) = (session.handle_time_update(), debug_bars.as_mut()) {
            bars.update(snapshot);
        }
    });
    inner.listeners.push(move || on_time.remove());

    let weak = Rc::downgrade(inner_rc);
    let on_pause = dom::listen(&audio, "pause", move |_| {
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().session.handle_pause();
        }
    });
    inner.listeners.push(move || on_pause.remove());

    let on_error = dom::listen(&source, "error", |_| {
        log::warn!("[audio] media could not be decoded");
    });
    inner.listeners.push(move || on_error.remove());

    match audio.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[audio] playback did not start: {:?}", e);
            }
        }),
        Err(e) => log::warn!("[audio] play() failed: {:?}", e),
    }
    inner.audio = Some(audio);
}
