use crate::constants::DEBUG_BARS_CLASS;
use crate::core::bar_transform;
use crate::dom;
use web_sys as web;

/// Development overlay drawing the raw analyser snapshot as vertical bars.
pub struct DebugBars {
    container: web::HtmlElement,
    bars: Vec<web::HtmlElement>,
}

impl DebugBars {
    pub fn new(mount: &web::HtmlElement) -> anyhow::Result<Self> {
        let document = dom::document()?;
        let container: web::HtmlElement = dom::create(&document, "div")?;
        _ = container.class_list().add_1(DEBUG_BARS_CLASS);
        mount
            .append_child(&container)
            .map_err(|e| anyhow::anyhow!("append debug bars: {:?}", e))?;
        Ok(Self {
            container,
            bars: Vec::new(),
        })
    }

    pub fn update(&mut self, snapshot: &[u8]) {
        if self.bars.is_empty() {
            self.create(snapshot.len());
        }
        for (bar, &value) in self.bars.iter().zip(snapshot) {
            _ = bar.style().set_property("transform", &bar_transform(value));
        }
    }

    fn create(&mut self, count: usize) {
        let Some(document) = dom::window_document() else {
            return;
        };
        for _ in 0..count {
            let Ok(bar) = dom::create::<web::HtmlElement>(&document, "div") else {
                continue;
            };
            if self.container.append_child(&bar).is_ok() {
                self.bars.push(bar);
            }
        }
    }

    pub fn destroy(&mut self) {
        self.container.remove();
        self.bars.clear();
    }
}
