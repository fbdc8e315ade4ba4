use crate::constants::{PANEL_CLASS, PANEL_TITLE};
use crate::core::{format_hex_color, Disposer, SettingKey, SettingKind, SettingValue, VisualSettings};
use crate::dom;
use std::rc::Rc;
use web_sys as web;

/// Debug control panel with one input per visual setting.
pub struct SettingsPanel {
    container: web::HtmlElement,
    listeners: Disposer,
}

impl SettingsPanel {
    pub fn new<F>(
        mount: &web::HtmlElement,
        settings: &VisualSettings,
        on_change: F,
    ) -> anyhow::Result<Self>
    where
        F: Fn(SettingKey, SettingValue) + 'static,
    {
        let document = dom::document()?;
        let container: web::HtmlElement = dom::create(&document, "div")?;
        _ = container.class_list().add_1(PANEL_CLASS);

        let title: web::HtmlElement = dom::create(&document, "div")?;
        title.set_inner_text(PANEL_TITLE);
        _ = container.append_child(&title);

        let on_change: Rc<dyn Fn(SettingKey, SettingValue)> = Rc::new(on_change);
        let mut listeners = Disposer::new();
        for key in SettingKey::ALL {
            let row: web::HtmlElement = dom::create(&document, "label")?;
            row.set_inner_text(key.name());
            let input: web::HtmlInputElement = dom::create(&document, "input")?;
            configure_input(&input, key, settings.get(key));
            _ = row.append_child(&input);
            _ = container.append_child(&row);

            let handler = on_change.clone();
            let source = input.clone();
            let listener = dom::listen(&input, "input", move |_| {
                match key.parse(&source.value(), source.checked()) {
                    Some(value) => handler(key, value),
                    None => log::warn!("[panel] ignored invalid {} value", key.name()),
                }
            });
            listeners.push(move || listener.remove());
        }

        mount
            .append_child(&container)
            .map_err(|e| anyhow::anyhow!("append panel: {:?}", e))?;
        Ok(Self {
            container,
            listeners,
        })
    }

    pub fn destroy(&mut self) {
        self.listeners.dispose();
        self.container.remove();
    }
}

fn configure_input(input: &web::HtmlInputElement, key: SettingKey, value: SettingValue) {
    match key.kind() {
        SettingKind::Toggle => {
            input.set_type("checkbox");
            input.set_checked(matches!(value, SettingValue::Bool(true)));
        }
        SettingKind::Number(range) => {
            input.set_type("range");
            input.set_min(&range.min.to_string());
            input.set_max(&range.max.to_string());
            input.set_step(&range.step.to_string());
            if let SettingValue::Number(v) = value {
                input.set_value(&v.to_string());
            }
        }
        SettingKind::Color => {
            input.set_type("color");
            if let SettingValue::Color(c) = value {
                input.set_value(&format_hex_color(c));
            }
        }
    }
}
