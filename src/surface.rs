//! Rendering surface contract and the DOM implementation.

use crate::layout::ChromeLayout;
use crate::{Rect, Size, TransitionState, VisualParams};

/// Enabled/disabled state of the navigation controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Where the gallery draws and measures.
///
/// Implement this for your rendering backend (DOM, scene graph, test
/// recorder). The gallery calls the setters with fully computed values and
/// never reads them back, so an implementation only has to apply them.
pub trait Surface {
    /// Current viewport size in pixels.
    fn viewport(&self) -> Size;

    /// On-page box of the source thumbnail for `index`.
    fn source_rect(&self, index: usize) -> Rect;

    /// Size the overlay image for `index`.
    fn set_item_size(&mut self, index: usize, size: Size);

    /// Position, fade, stack and scale the overlay image for `index`.
    fn apply_item(&mut self, index: usize, params: &VisualParams);

    /// Reflect the overlay lifecycle (e.g. toggle state classes).
    fn set_overlay_state(&mut self, state: TransitionState);

    fn set_overlay_opacity(&mut self, opacity: f64);

    fn set_nav(&mut self, nav: NavState);

    /// Position counter, e.g. `"3/10"`.
    fn set_counter(&mut self, text: &str);

    fn set_summary_text(&mut self, title: &str, description: &str);

    fn set_summary_opacity(&mut self, opacity: f64);

    /// Place the summary and controls panels.
    fn apply_chrome(&mut self, chrome: &ChromeLayout);
}

/// CSS transform for a set of visual params.
///
/// ## Example
///
/// ```rust
/// use gallery_stack_view::{surface::css_transform, VisualParams};
///
/// let params = VisualParams { x: 12.34, y: -5.0, opacity: 1.0, z_index: 5, scale: 1.2 };
/// assert_eq!(css_transform(&params), "translate3d(12.3px, -5.0px, 0) scale(1.2)");
/// ```
pub fn css_transform(params: &VisualParams) -> String {
    format!(
        "translate3d({:.1}px, {:.1}px, 0) scale({})",
        params.x, params.y, params.scale
    )
}

/// Web-specific surface and event wiring.
#[cfg(feature = "web")]
pub mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{
        Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlImageElement,
        KeyboardEvent, Node, Window,
    };

    use super::*;
    use crate::{Gallery, GalleryConfig, GalleryError, Item, SurfaceClasses};

    fn dom_error(what: impl Into<String>) -> GalleryError {
        GalleryError::Dom(what.into())
    }

    fn set_style(element: &HtmlElement, name: &str, value: &str) {
        let _ = element.style().set_property(name, value);
    }

    fn find<T: JsCast>(root: &Element, class: &str) -> Result<T, GalleryError> {
        root.query_selector(&format!(".{class}"))
            .map_err(|_| dom_error(format!("invalid selector .{class}")))?
            .ok_or_else(|| dom_error(format!("missing .{class}")))?
            .dyn_into::<T>()
            .map_err(|_| dom_error(format!("unexpected element type for .{class}")))
    }

    /// Overlay markup minus the images, which are appended separately.
    fn overlay_markup(classes: &SurfaceClasses, count: usize) -> String {
        format!(
            r#"<div class="{summary}"><div class="{summary_content}"><h2 class="{title}"></h2><p class="{description}"></p></div></div><div class="{controls}"><button class="{close}"></button><div class="{navs}"><button class="{nav} {nav_prev}"></button><div class="{counter}">1/{count}</div><button class="{nav} {nav_next}"></button></div></div><div class="{images}"></div>"#,
            summary = classes.summary,
            summary_content = classes.summary_content,
            title = classes.title,
            description = classes.description,
            controls = classes.controls,
            close = classes.close,
            navs = classes.navs,
            nav = classes.nav,
            nav_prev = classes.nav_prev,
            nav_next = classes.nav_next,
            counter = classes.counter,
            images = classes.images,
            count = count,
        )
    }

    /// DOM overlay built next to a container of gallery links.
    #[derive(Debug)]
    pub struct DomSurface {
        window: Window,
        classes: SurfaceClasses,
        links: Vec<Element>,
        overlay: HtmlElement,
        images: Vec<HtmlElement>,
        summary: HtmlElement,
        summary_content: HtmlElement,
        title: HtmlElement,
        description: HtmlElement,
        controls: HtmlElement,
        navs: HtmlElement,
        close: HtmlElement,
        nav_prev: HtmlButtonElement,
        nav_next: HtmlButtonElement,
        counter: HtmlElement,
    }

    impl DomSurface {
        /// Collect the links under `container` and append the overlay to
        /// the document body.
        ///
        /// Returns the surface together with one [`Item`] per link, read from
        /// its `href`, `data-title` and `data-description` attributes.
        pub fn build(container: &Element, config: &GalleryConfig) -> Result<(Self, Vec<Item>), GalleryError> {
            let window = web_sys::window().ok_or("No window available").map_err(dom_error)?;
            let document = window.document().ok_or("No document available").map_err(dom_error)?;
            let body = document.body().ok_or("No body available").map_err(dom_error)?;
            let classes = config.classes.clone();

            let nodes = container
                .query_selector_all(&config.link_selector)
                .map_err(|_| dom_error(format!("invalid link selector {}", config.link_selector)))?;
            let mut links = Vec::with_capacity(nodes.length() as usize);
            for i in 0..nodes.length() {
                if let Some(link) = nodes.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                    links.push(link);
                }
            }

            let items: Vec<Item> = links
                .iter()
                .map(|link| {
                    Item::new(
                        link.get_attribute("href").unwrap_or_default(),
                        link.get_attribute("data-title").unwrap_or_default(),
                        link.get_attribute("data-description").unwrap_or_default(),
                    )
                })
                .collect();

            let overlay = document
                .create_element("div")
                .map_err(|_| dom_error("Failed to create overlay"))?
                .dyn_into::<HtmlElement>()
                .map_err(|_| dom_error("Failed to cast overlay to HtmlElement"))?;
            overlay.set_class_name(&classes.modal);
            overlay.set_inner_html(&overlay_markup(&classes, items.len()));

            let images_root: Element = find(&overlay, &classes.images)?;
            let mut images = Vec::with_capacity(items.len());
            for item in &items {
                let image = document
                    .create_element("img")
                    .map_err(|_| dom_error("Failed to create image"))?
                    .dyn_into::<HtmlImageElement>()
                    .map_err(|_| dom_error("Failed to cast image to HtmlImageElement"))?;
                image.set_src(&item.src);
                image.set_alt(&item.title);
                image.set_class_name(&classes.image);
                images_root
                    .append_child(&image)
                    .map_err(|_| dom_error("Failed to append image"))?;
                images.push(image.unchecked_into::<HtmlElement>());
            }

            // Resolve every part before the overlay enters the document.
            let summary: HtmlElement = find(&overlay, &classes.summary)?;
            let summary_content: HtmlElement = find(&overlay, &classes.summary_content)?;
            let title: HtmlElement = find(&overlay, &classes.title)?;
            let description: HtmlElement = find(&overlay, &classes.description)?;
            let controls: HtmlElement = find(&overlay, &classes.controls)?;
            let navs: HtmlElement = find(&overlay, &classes.navs)?;
            let close: HtmlElement = find(&overlay, &classes.close)?;
            let nav_prev: HtmlButtonElement = find(&overlay, &classes.nav_prev)?;
            let nav_next: HtmlButtonElement = find(&overlay, &classes.nav_next)?;
            let counter: HtmlElement = find(&overlay, &classes.counter)?;

            body.append_child(&overlay)
                .map_err(|_| dom_error("Failed to append overlay"))?;

            let surface = Self {
                window,
                classes,
                links,
                overlay,
                images,
                summary,
                summary_content,
                title,
                description,
                controls,
                navs,
                close,
                nav_prev,
                nav_next,
                counter,
            };
            Ok((surface, items))
        }

        /// Index of the gallery link `element`, if it is one.
        pub fn link_index(&self, element: &Element) -> Option<usize> {
            let node: &Node = element;
            self.links.iter().position(|link| link.is_same_node(Some(node)))
        }

        /// Remove the overlay from the document.
        pub fn detach(&self) {
            self.overlay.remove();
        }
    }

    impl Surface for DomSurface {
        fn viewport(&self) -> Size {
            let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            Size::new(width, height)
        }

        fn source_rect(&self, index: usize) -> Rect {
            self.links
                .get(index)
                .map(|link| {
                    let rect = link.get_bounding_client_rect();
                    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
                })
                .unwrap_or_default()
        }

        fn set_item_size(&mut self, index: usize, size: Size) {
            if let Some(image) = self.images.get(index) {
                set_style(image, "width", &format!("{}px", size.width));
                set_style(image, "height", &format!("{}px", size.height));
            }
        }

        fn apply_item(&mut self, index: usize, params: &VisualParams) {
            if let Some(image) = self.images.get(index) {
                set_style(image, "opacity", &params.opacity.to_string());
                set_style(image, "transform", &css_transform(params));
                set_style(image, "z-index", &params.z_index.to_string());
            }
        }

        fn set_overlay_state(&mut self, state: TransitionState) {
            let class_list = self.overlay.class_list();
            let opened = matches!(state, TransitionState::Opened | TransitionState::Closing);
            let _ = class_list.toggle_with_force(&self.classes.opening, state == TransitionState::Opening);
            let _ = class_list.toggle_with_force(&self.classes.opened, opened);
        }

        fn set_overlay_opacity(&mut self, opacity: f64) {
            set_style(&self.overlay, "opacity", &opacity.to_string());
        }

        fn set_nav(&mut self, nav: NavState) {
            self.nav_prev.set_disabled(nav.prev_disabled);
            self.nav_next.set_disabled(nav.next_disabled);
        }

        fn set_counter(&mut self, text: &str) {
            self.counter.set_text_content(Some(text));
        }

        fn set_summary_text(&mut self, title: &str, description: &str) {
            self.title.set_text_content(Some(title));
            self.description.set_text_content(Some(description));
        }

        fn set_summary_opacity(&mut self, opacity: f64) {
            set_style(&self.summary_content, "opacity", &opacity.to_string());
        }

        fn apply_chrome(&mut self, chrome: &ChromeLayout) {
            set_style(&self.summary, "width", &format!("{}%", chrome.summary_width_pct));
            set_style(&self.controls, "margin-top", &format!("{}px", chrome.controls_margin_top));
            if let Some(height) = chrome.controls_height {
                set_style(&self.controls, "height", &format!("{}px", height));
            }
        }
    }

    type RafClosure = Closure<dyn FnMut(f64)>;
    type TimeoutClosure = Closure<dyn FnMut()>;

    struct Mounted {
        gallery: Gallery,
        surface: DomSurface,
        /// ID of the pending `requestAnimationFrame` callback
        raf_id: Option<i32>,
        /// ID and due time of the pending `setTimeout` callback
        timeout: Option<(i32, f64)>,
    }

    /// Shared state behind every browser callback.
    #[derive(Clone)]
    struct Driver {
        window: Window,
        state: Rc<RefCell<Mounted>>,
        raf: Rc<RefCell<Option<RafClosure>>>,
        timer: Rc<RefCell<Option<TimeoutClosure>>>,
    }

    impl Driver {
        /// Request a frame while a fade runs and keep one timeout armed for
        /// the earliest pending deadline.
        fn schedule(&self) {
            let mut mounted = self.state.borrow_mut();

            if mounted.gallery.needs_frame() && mounted.raf_id.is_none() {
                if let Some(closure) = self.raf.borrow().as_ref() {
                    if let Ok(id) = self.window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                        mounted.raf_id = Some(id);
                    }
                }
            }

            let deadline = mounted.gallery.next_deadline();
            if mounted.timeout.map(|(_, due)| due) == deadline {
                return;
            }
            if let Some((id, _)) = mounted.timeout.take() {
                self.window.clear_timeout_with_handle(id);
            }
            let Some(deadline) = deadline else {
                return;
            };
            let delay = mounted.gallery.time_until_deadline(js_sys::Date::now()).unwrap_or(0.0).ceil() as i32;
            if let Some(closure) = self.timer.borrow().as_ref() {
                if let Ok(id) = self
                    .window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), delay)
                {
                    mounted.timeout = Some((id, deadline));
                }
            }
        }

        /// Cancel pending callbacks and free the self-referencing closures.
        fn shutdown(&self) {
            {
                let mut mounted = self.state.borrow_mut();
                if let Some(id) = mounted.raf_id.take() {
                    let _ = self.window.cancel_animation_frame(id);
                }
                if let Some((id, _)) = mounted.timeout.take() {
                    self.window.clear_timeout_with_handle(id);
                }
                mounted.surface.detach();
            }
            // Break the closures' reference cycles so they can be freed.
            self.raf.borrow_mut().take();
            self.timer.borrow_mut().take();
        }
    }

    struct Listener {
        target: EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    }

    fn listen(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Listener, GalleryError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|_| dom_error(format!("Failed to listen for {event}")))?;
        Ok(Listener {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// A gallery bound to the DOM.
    ///
    /// Dropping the handle removes the overlay and every listener.
    pub struct GalleryHandle {
        driver: Driver,
        listeners: Vec<Listener>,
    }

    impl GalleryHandle {
        /// Current overlay lifecycle state.
        pub fn state(&self) -> TransitionState {
            self.driver.state.borrow().gallery.state()
        }

        /// Index of the image currently in front.
        pub fn current_index(&self) -> usize {
            self.driver.state.borrow().gallery.current_index()
        }
    }

    impl std::fmt::Debug for GalleryHandle {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let mounted = self.driver.state.borrow();
            f.debug_struct("GalleryHandle")
                .field("state", &mounted.gallery.state())
                .field("current_index", &mounted.gallery.current_index())
                .field("listeners", &self.listeners.len())
                .finish()
        }
    }

    impl Drop for GalleryHandle {
        fn drop(&mut self) {
            for listener in self.listeners.drain(..) {
                let _ = listener
                    .target
                    .remove_event_listener_with_callback(listener.event, listener.closure.as_ref().unchecked_ref());
            }
            self.driver.shutdown();
        }
    }

    /// Build the overlay for the links inside `container` and wire up clicks,
    /// Escape and window resizes.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// use gallery_stack_view::{surface::web::mount, GalleryConfig};
    ///
    /// let container = document.query_selector(".gallery")?.unwrap();
    /// let handle = mount(&container, GalleryConfig::default())?;
    /// // keep `handle` alive for as long as the gallery should work
    /// ```
    pub fn mount(container: &Element, config: GalleryConfig) -> Result<GalleryHandle, GalleryError> {
        let (surface, items) = DomSurface::build(container, &config)?;
        let window = surface.window.clone();
        let link_selector = config.link_selector.clone();
        let nav_prev_class = config.classes.nav_prev.clone();
        let nav_next_class = config.classes.nav_next.clone();
        let navs = surface.navs.clone().unchecked_into::<EventTarget>();
        let close = surface.close.clone().unchecked_into::<EventTarget>();

        let gallery = match Gallery::new(items, config) {
            Ok(gallery) => gallery,
            Err(err) => {
                surface.detach();
                return Err(err);
            }
        };
        log::debug!("gallery mounted");

        let driver = Driver {
            window: window.clone(),
            state: Rc::new(RefCell::new(Mounted {
                gallery,
                surface,
                raf_id: None,
                timeout: None,
            })),
            raf: Rc::new(RefCell::new(None)),
            timer: Rc::new(RefCell::new(None)),
        };

        // Fades
        {
            let driver_inner = driver.clone();
            *driver.raf.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
                {
                    let mut mounted = driver_inner.state.borrow_mut();
                    mounted.raf_id = None;
                    let Mounted { gallery, surface, .. } = &mut *mounted;
                    gallery.on_frame(surface);
                }
                driver_inner.schedule();
            }) as Box<dyn FnMut(f64)>));
        }

        // Summary swaps and throttled resizes
        {
            let driver_inner = driver.clone();
            *driver.timer.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                {
                    let mut mounted = driver_inner.state.borrow_mut();
                    mounted.timeout = None;
                    let Mounted { gallery, surface, .. } = &mut *mounted;
                    gallery.poll(js_sys::Date::now(), surface);
                }
                driver_inner.schedule();
            }) as Box<dyn FnMut()>));
        }

        let mut listeners = Vec::new();

        // Opening
        {
            let driver = driver.clone();
            listeners.push(listen(container, "click", move |event: Event| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                let Ok(Some(link)) = target.closest(&link_selector) else {
                    return;
                };
                event.prevent_default();
                {
                    let mut mounted = driver.state.borrow_mut();
                    let Mounted { gallery, surface, .. } = &mut *mounted;
                    if let Some(index) = surface.link_index(&link) {
                        gallery.activate(index, surface);
                    }
                }
                driver.schedule();
            })?);
        }

        // Navigation
        {
            let driver = driver.clone();
            listeners.push(listen(&navs, "click", move |event: Event| {
                event.prevent_default();
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                let Ok(Some(button)) = target.closest("button") else {
                    return;
                };
                let class_list = button.class_list();
                let now = js_sys::Date::now();
                {
                    let mut mounted = driver.state.borrow_mut();
                    let Mounted { gallery, surface, .. } = &mut *mounted;
                    if class_list.contains(&nav_prev_class) {
                        gallery.prev(now, surface);
                    } else if class_list.contains(&nav_next_class) {
                        gallery.next(now, surface);
                    }
                }
                driver.schedule();
            })?);
        }

        // Closing
        {
            let driver = driver.clone();
            listeners.push(listen(&close, "click", move |_event: Event| {
                {
                    let mut mounted = driver.state.borrow_mut();
                    let Mounted { gallery, surface, .. } = &mut *mounted;
                    gallery.close(surface);
                }
                driver.schedule();
            })?);
        }
        {
            let driver = driver.clone();
            listeners.push(listen(&window, "keyup", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                {
                    let mut mounted = driver.state.borrow_mut();
                    let Mounted { gallery, surface, .. } = &mut *mounted;
                    gallery.handle_key(&event.key(), event.key_code(), surface);
                }
                driver.schedule();
            })?);
        }

        // Resizing
        {
            let driver = driver.clone();
            listeners.push(listen(&window, "resize", move |_event: Event| {
                {
                    let mut mounted = driver.state.borrow_mut();
                    let viewport = mounted.surface.viewport();
                    mounted.gallery.resize(js_sys::Date::now(), viewport);
                }
                driver.schedule();
            })?);
        }

        Ok(GalleryHandle { driver, listeners })
    }
}
