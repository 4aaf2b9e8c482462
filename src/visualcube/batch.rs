//! Batch mapping of algorithms to image descriptors.

use crate::notation::mirror_algorithm;
use crate::types::{ImageDescriptor, RenderOptions};

use super::request::build_url;
use super::scheme::color_scheme;

/// Produces one descriptor per algorithm, in input order.
///
/// When `options.mirror` is set the URL embeds the mirrored sequence, but the
/// descriptor keeps the algorithm exactly as given.
pub fn generate_images(
    base: &str,
    algorithms: &[String],
    options: &RenderOptions,
) -> Vec<ImageDescriptor> {
    let scheme = color_scheme(options.top_color);

    algorithms
        .iter()
        .map(|alg| {
            let url = if options.mirror {
                build_url(base, &mirror_algorithm(alg), options, scheme)
            } else {
                build_url(base, alg, options, scheme)
            };
            ImageDescriptor::new(alg.clone(), url)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Stage, TopColor};
    use crate::visualcube::{encode_component, DEFAULT_RENDERER_URL};

    fn algs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn preserves_order_and_count() {
        let input = algs(&["R", "U", "F", "B", "L"]);
        let images = generate_images(DEFAULT_RENDERER_URL, &input, &RenderOptions::default());
        assert_eq!(images.len(), 5);
        for (img, alg) in images.iter().zip(&input) {
            assert_eq!(&img.alg, alg);
            assert!(img.url.contains(&format!("case={}", encode_component(alg))));
        }
    }

    #[test]
    fn empty_input_gives_no_descriptors() {
        assert!(generate_images(DEFAULT_RENDERER_URL, &[], &RenderOptions::default()).is_empty());
    }

    #[test]
    fn mirrored_url_keeps_original_label() {
        let options = RenderOptions {
            mirror: true,
            ..Default::default()
        };
        let images = generate_images(DEFAULT_RENDERER_URL, &algs(&["R U R'"]), &options);
        assert_eq!(images[0].alg, "R U R'");
        assert!(images[0].url.contains("case=L'%20U'%20L&"));
    }

    #[test]
    fn mirrored_batch_with_white_top_and_oll_stage() {
        let options = RenderOptions {
            pzl: 3,
            inverse: false,
            mirror: true,
            top_color: TopColor::White,
            stage: Stage::Oll,
            size: 256,
            view: true,
        };
        let algorithms = algs(&["R U R' U'", "F2 B2"]);
        let images = generate_images(DEFAULT_RENDERER_URL, &algorithms, &options);

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].alg, "R U R' U'");
        assert_eq!(images[1].alg, "F2 B2");

        let expected = [mirror_algorithm("R U R' U'"), "F2 B2".to_string()];
        for (img, mirrored) in images.iter().zip(expected) {
            let parsed = url::Url::parse(&img.url).unwrap();
            let pairs: Vec<(String, String)> = parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            let get = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());

            assert_eq!(get("case"), Some(mirrored.as_str()));
            assert_eq!(get("alg"), None);
            assert_eq!(get("size"), Some("256"));
            assert_eq!(get("pzl"), Some("3"));
            assert_eq!(get("view"), Some("plan"));
            assert_eq!(get("stage"), Some("oll"));
            assert_eq!(get("sch"), Some("wrgyob"));
            assert_eq!(get("fmt"), Some("svg"));
        }
        assert!(images[0].url.contains("case=L'%20U'%20L%20U&"));
    }

    #[test]
    fn deterministic() {
        let input = algs(&["R U", "M2 U M2"]);
        let options = RenderOptions {
            top_color: TopColor::Red,
            ..Default::default()
        };
        assert_eq!(
            generate_images(DEFAULT_RENDERER_URL, &input, &options),
            generate_images(DEFAULT_RENDERER_URL, &input, &options)
        );
    }
}
