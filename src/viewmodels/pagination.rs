// ============================================================================
// PAGINATION VIEWMODEL - Navegación del listado sin recargar la página
// ============================================================================
// Click en un link de paginación:
//   fetch HTML → extraer #productList y #pagination → reemplazar solo esas
//   regiones → pushState {ajax, url} → re-enlazar botones → re-render carrito
// Cualquier fallo → navegación completa a la URL (se autocorrige).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::RegionConfig;
use crate::models::{strip_fragment, NavigationState};
use crate::services::InventoryApi;

/// HTML interno de las dos regiones que se reemplazan
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageFragments {
    pub product_list: String,
    pub pagination: String,
}

/// Operaciones sobre el documento vivo que necesita la paginación
pub trait PageSurface {
    /// Extrae las regiones de un documento HTML completo
    fn extract_fragments(&self, html: &str, regions: &RegionConfig) -> Option<PageFragments>;
    /// Reemplaza el contenido de la región `id`; `false` si no existe
    fn replace_region(&self, id: &str, inner_html: &str) -> bool;
    fn push_history(&self, state: &NavigationState);
    /// Navegación completa del navegador
    fn navigate(&self, url: &str);
}

/// Datos de un click sobre un `<a>` dentro de la paginación
#[derive(Clone, Debug, Default)]
pub struct LinkClick<'a> {
    /// Atributo `href` tal como está escrito
    pub href_attr: Option<&'a str>,
    /// URL absoluta resuelta por el navegador
    pub resolved_url: &'a str,
    pub target: Option<&'a str>,
    /// Ctrl/Meta/Shift/Alt o botón distinto del principal
    pub modified: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkDecision {
    Intercept(String),
    /// Se deja el comportamiento por defecto del navegador
    Default,
}

const NON_NAVIGATIONAL_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:"];

pub fn classify_link(click: &LinkClick<'_>) -> LinkDecision {
    if click.modified {
        return LinkDecision::Default;
    }
    let href = match click.href_attr.map(str::trim) {
        Some(href) if !href.is_empty() => href,
        _ => return LinkDecision::Default,
    };
    if href.starts_with('#') {
        return LinkDecision::Default;
    }
    let lower = href.to_ascii_lowercase();
    if NON_NAVIGATIONAL_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return LinkDecision::Default;
    }
    if let Some(target) = click.target.map(str::trim) {
        if !target.is_empty() && !target.eq_ignore_ascii_case("_self") {
            return LinkDecision::Default;
        }
    }
    if click.resolved_url.is_empty() {
        return LinkDecision::Default;
    }
    LinkDecision::Intercept(click.resolved_url.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    Swapped { url: String },
    /// Se hizo navegación completa
    FellBack { url: String, reason: String },
    /// popstate hacia la URL ya mostrada (solo cambió el fragmento)
    Unchanged,
}

/// Pasos explícitos tras cada reemplazo de regiones
#[derive(Clone)]
pub struct PostSwapSteps {
    pub rebind_product_list: Rc<dyn Fn()>,
    pub rerender_cart: Rc<dyn Fn()>,
}

#[derive(Clone)]
pub struct PaginationController {
    regions: RegionConfig,
    current_url: Rc<RefCell<String>>,
    steps: PostSwapSteps,
}

impl PaginationController {
    pub fn new(regions: RegionConfig, initial_url: &str, steps: PostSwapSteps) -> Self {
        Self {
            regions,
            current_url: Rc::new(RefCell::new(initial_url.to_string())),
            steps,
        }
    }

    pub fn regions(&self) -> &RegionConfig {
        &self.regions
    }

    /// URL cuyo contenido se está mostrando
    pub fn current_url(&self) -> String {
        self.current_url.borrow().clone()
    }

    /// Estado para marcar la entrada inicial con replaceState
    pub fn initial_state(&self) -> NavigationState {
        NavigationState::initial(self.current_url())
    }

    /// Navegación hacia adelante desde un link interceptado
    pub async fn follow<A, S>(&self, url: &str, api: &A, surface: &S) -> SwapOutcome
    where
        A: InventoryApi + ?Sized,
        S: PageSurface + ?Sized,
    {
        self.swap(url, true, api, surface).await
    }

    /// Atrás/adelante del navegador: mismo reemplazo, sin nueva entrada
    pub async fn restore<A, S>(
        &self,
        state: Option<NavigationState>,
        location: &str,
        api: &A,
        surface: &S,
    ) -> SwapOutcome
    where
        A: InventoryApi + ?Sized,
        S: PageSurface + ?Sized,
    {
        let target = state.map(|s| s.url).unwrap_or_else(|| location.to_string());
        if strip_fragment(&target) == strip_fragment(&self.current_url.borrow()) {
            return SwapOutcome::Unchanged;
        }
        self.swap(&target, false, api, surface).await
    }

    async fn swap<A, S>(&self, url: &str, push: bool, api: &A, surface: &S) -> SwapOutcome
    where
        A: InventoryApi + ?Sized,
        S: PageSurface + ?Sized,
    {
        log::info!("📄 [PAGINATION] Cargando {}", url);

        let html = match api.fetch_page(url).await {
            Ok(html) => html,
            Err(e) => return self.fall_back(url, e.to_string(), surface),
        };

        let fragments = match surface.extract_fragments(&html, &self.regions) {
            Some(fragments) => fragments,
            None => {
                return self.fall_back(url, "regiones ausentes en la respuesta".into(), surface)
            }
        };

        let replaced = surface.replace_region(&self.regions.product_list_id, &fragments.product_list)
            && surface.replace_region(&self.regions.pagination_id, &fragments.pagination);
        if !replaced {
            return self.fall_back(url, "regiones ausentes en la página".into(), surface);
        }

        if push {
            surface.push_history(&NavigationState::ajax(url));
        }
        *self.current_url.borrow_mut() = url.to_string();

        (self.steps.rebind_product_list)();
        (self.steps.rerender_cart)();

        log::info!("✅ [PAGINATION] Página reemplazada: {}", url);
        SwapOutcome::Swapped {
            url: url.to_string(),
        }
    }

    fn fall_back<S>(&self, url: &str, reason: String, surface: &S) -> SwapOutcome
    where
        S: PageSurface + ?Sized,
    {
        log::warn!("⚠️ [PAGINATION] {} → navegación completa a {}", reason, url);
        surface.navigate(url);
        SwapOutcome::FellBack {
            url: url.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::models::{BatchRequest, BatchResponse};
    use crate::services::ApiError;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Documento servido: "LIST:<html>|PAGER:<html>"
    struct Pages(HashMap<String, Result<String, ApiError>>);

    #[async_trait(?Send)]
    impl InventoryApi for Pages {
        async fn submit_batch(
            &self,
            _request: &BatchRequest,
            _page: &PageConfig,
        ) -> Result<BatchResponse, ApiError> {
            unreachable!()
        }

        async fn lookup_product(&self, _code: &str) -> Result<Value, ApiError> {
            unreachable!()
        }

        async fn fetch_page(&self, url: &str) -> Result<String, ApiError> {
            self.0
                .get(url)
                .cloned()
                .unwrap_or(Err(ApiError::Http { status: 404, body: String::new() }))
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        ops: RefCell<Vec<String>>,
        missing_live_region: bool,
    }

    impl PageSurface for FakeSurface {
        fn extract_fragments(&self, html: &str, _regions: &RegionConfig) -> Option<PageFragments> {
            let (list, pager) = html.split_once('|')?;
            Some(PageFragments {
                product_list: list.strip_prefix("LIST:")?.to_string(),
                pagination: pager.strip_prefix("PAGER:")?.to_string(),
            })
        }

        fn replace_region(&self, id: &str, inner_html: &str) -> bool {
            if self.missing_live_region && id == "pagination" {
                return false;
            }
            self.ops.borrow_mut().push(format!("replace:{}:{}", id, inner_html));
            true
        }

        fn push_history(&self, state: &NavigationState) {
            self.ops
                .borrow_mut()
                .push(format!("push:{}:{}", state.ajax, state.url));
        }

        fn navigate(&self, url: &str) {
            self.ops.borrow_mut().push(format!("navigate:{}", url));
        }
    }

    fn controller(rebinds: Rc<Cell<u32>>, renders: Rc<Cell<u32>>) -> PaginationController {
        PaginationController::new(
            RegionConfig::default(),
            "/salidas/nueva?page=0",
            PostSwapSteps {
                rebind_product_list: Rc::new(move || rebinds.set(rebinds.get() + 1)),
                rerender_cart: Rc::new(move || renders.set(renders.get() + 1)),
            },
        )
    }

    fn pages() -> Pages {
        let mut map = HashMap::new();
        map.insert(
            "/salidas/nueva?page=0".to_string(),
            Ok("LIST:<p0>|PAGER:<n0>".to_string()),
        );
        map.insert(
            "/salidas/nueva?page=1".to_string(),
            Ok("LIST:<p1>|PAGER:<n1>".to_string()),
        );
        map.insert(
            "/salidas/nueva?page=9".to_string(),
            Err(ApiError::Http { status: 500, body: "boom".into() }),
        );
        map.insert(
            "/salidas/nueva?page=7".to_string(),
            Ok("<html>sin regiones</html>".to_string()),
        );
        Pages(map)
    }

    #[test]
    fn classify_ignores_non_navigational_links() {
        let base = LinkClick {
            href_attr: Some("?page=2"),
            resolved_url: "http://h/salidas/nueva?page=2",
            target: None,
            modified: false,
        };
        assert_eq!(
            classify_link(&base),
            LinkDecision::Intercept("http://h/salidas/nueva?page=2".into())
        );

        let cases = [
            LinkClick { href_attr: Some("#"), ..base.clone() },
            LinkClick { href_attr: Some("#top"), ..base.clone() },
            LinkClick { href_attr: Some("JavaScript:void(0)"), ..base.clone() },
            LinkClick { href_attr: Some("mailto:a@b.c"), ..base.clone() },
            LinkClick { href_attr: None, ..base.clone() },
            LinkClick { target: Some("_blank"), ..base.clone() },
            LinkClick { modified: true, ..base.clone() },
        ];
        for click in cases {
            assert_eq!(classify_link(&click), LinkDecision::Default, "{:?}", click);
        }

        let same_tab = LinkClick { target: Some("_self"), ..base.clone() };
        assert!(matches!(classify_link(&same_tab), LinkDecision::Intercept(_)));
    }

    #[test]
    fn successful_swap_replaces_only_regions_and_pushes_history() {
        let (rebinds, renders) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let controller = controller(rebinds.clone(), renders.clone());
        let surface = FakeSurface::default();

        let outcome = block_on(controller.follow("/salidas/nueva?page=1", &pages(), &surface));

        assert_eq!(outcome, SwapOutcome::Swapped { url: "/salidas/nueva?page=1".into() });
        assert_eq!(
            *surface.ops.borrow(),
            vec![
                "replace:productList:<p1>".to_string(),
                "replace:pagination:<n1>".to_string(),
                "push:true:/salidas/nueva?page=1".to_string(),
            ]
        );
        assert_eq!(controller.current_url(), "/salidas/nueva?page=1");
        assert_eq!((rebinds.get(), renders.get()), (1, 1));
    }

    #[test]
    fn failed_fetch_falls_back_to_full_navigation() {
        let (rebinds, renders) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let controller = controller(rebinds.clone(), renders.clone());
        let surface = FakeSurface::default();

        let outcome = block_on(controller.follow("/salidas/nueva?page=9", &pages(), &surface));

        assert!(matches!(outcome, SwapOutcome::FellBack { .. }));
        assert_eq!(
            *surface.ops.borrow(),
            vec!["navigate:/salidas/nueva?page=9".to_string()]
        );
        assert_eq!(controller.current_url(), "/salidas/nueva?page=0");
        assert_eq!((rebinds.get(), renders.get()), (0, 0));
    }

    #[test]
    fn response_without_regions_falls_back() {
        let controller = controller(Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let surface = FakeSurface::default();
        let outcome = block_on(controller.follow("/salidas/nueva?page=7", &pages(), &surface));
        assert!(matches!(outcome, SwapOutcome::FellBack { .. }));
        assert_eq!(
            *surface.ops.borrow(),
            vec!["navigate:/salidas/nueva?page=7".to_string()]
        );
    }

    #[test]
    fn missing_live_region_falls_back() {
        let controller = controller(Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let surface = FakeSurface {
            missing_live_region: true,
            ..FakeSurface::default()
        };
        let outcome = block_on(controller.follow("/salidas/nueva?page=1", &pages(), &surface));
        assert!(matches!(outcome, SwapOutcome::FellBack { .. }));
        assert_eq!(
            surface.ops.borrow().last().map(String::as_str),
            Some("navigate:/salidas/nueva?page=1")
        );
    }

    #[test]
    fn popstate_reswaps_without_pushing() {
        let (rebinds, renders) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let controller = controller(rebinds.clone(), renders.clone());
        let surface = FakeSurface::default();
        let pages = pages();

        block_on(controller.follow("/salidas/nueva?page=1", &pages, &surface));
        surface.ops.borrow_mut().clear();

        // Atrás hasta la entrada inicial
        let outcome = block_on(controller.restore(
            Some(NavigationState::initial("/salidas/nueva?page=0")),
            "/salidas/nueva?page=0",
            &pages,
            &surface,
        ));
        assert_eq!(outcome, SwapOutcome::Swapped { url: "/salidas/nueva?page=0".into() });
        assert_eq!(
            *surface.ops.borrow(),
            vec![
                "replace:productList:<p0>".to_string(),
                "replace:pagination:<n0>".to_string(),
            ]
        );
        assert_eq!((rebinds.get(), renders.get()), (2, 2));
    }

    #[test]
    fn popstate_with_failing_fetch_navigates_fully() {
        let (rebinds, renders) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let controller = controller(rebinds.clone(), renders.clone());
        let surface = FakeSurface::default();

        let outcome = block_on(controller.restore(
            Some(NavigationState::ajax("/salidas/nueva?page=9")),
            "/salidas/nueva?page=9",
            &pages(),
            &surface,
        ));

        assert_eq!(
            outcome,
            SwapOutcome::FellBack {
                url: "/salidas/nueva?page=9".into(),
                reason: "HTTP 500: boom".into(),
            }
        );
        assert_eq!(
            *surface.ops.borrow(),
            vec!["navigate:/salidas/nueva?page=9".to_string()]
        );
        assert!(!surface.ops.borrow().iter().any(|op| op.starts_with("replace:")));
        assert_eq!(controller.current_url(), "/salidas/nueva?page=0");
        assert_eq!((rebinds.get(), renders.get()), (0, 0));
    }

    #[test]
    fn popstate_without_state_uses_location_and_skips_same_page() {
        let controller = controller(Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let surface = FakeSurface::default();
        let pages = pages();

        let outcome = block_on(controller.restore(None, "/salidas/nueva?page=0#arriba", &pages, &surface));
        assert_eq!(outcome, SwapOutcome::Unchanged);
        assert!(surface.ops.borrow().is_empty());

        let outcome = block_on(controller.restore(None, "/salidas/nueva?page=1", &pages, &surface));
        assert!(matches!(outcome, SwapOutcome::Swapped { .. }));
    }
}
