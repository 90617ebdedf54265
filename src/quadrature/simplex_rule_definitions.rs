//! Symmetric quadrature rules on the reference triangle (0, 0), (1, 0), (0, 1).
//!
//! The weights of each rule sum to the area of the reference triangle.
use std::collections::HashMap;

/// A rule given as (degree, points, weights)
type RuleDefinition = (usize, Vec<f64>, Vec<f64>);

/// The three points (a, a), (1 - 2a, a), (a, 1 - 2a)
fn orbit3(a: f64) -> Vec<f64> {
    vec![a, a, 1.0 - 2.0 * a, a, a, 1.0 - 2.0 * a]
}

/// The six permutations of the barycentric coordinates (a, b, 1 - a - b)
fn orbit6(a: f64, b: f64) -> Vec<f64> {
    let c = 1.0 - a - b;
    vec![a, b, b, a, a, c, c, a, b, c, c, b]
}

lazy_static! {
    pub(crate) static ref SIMPLEX_RULE_DEFINITIONS: HashMap<usize, RuleDefinition> = {
        let mut rules = HashMap::new();

        rules.insert(1, (1, vec![1.0 / 3.0, 1.0 / 3.0], vec![0.5]));

        rules.insert(3, (2, orbit3(1.0 / 6.0), vec![1.0 / 6.0; 3]));

        let mut points = orbit3(0.445948490915965);
        points.extend(orbit3(0.091576213509771));
        let mut weights = vec![0.1116907948390055; 3];
        weights.extend([0.054975871827661; 3]);
        rules.insert(6, (4, points, weights));

        let mut points = vec![1.0 / 3.0, 1.0 / 3.0];
        points.extend(orbit3(0.470142064105115));
        points.extend(orbit3(0.101286507323456));
        let mut weights = vec![0.1125];
        weights.extend([0.066197076394253; 3]);
        weights.extend([0.0629695902724135; 3]);
        rules.insert(7, (5, points, weights));

        let mut points = orbit3(0.249286745170910);
        points.extend(orbit3(0.063089014491502));
        points.extend(orbit6(0.310352451033785, 0.053145049844816));
        let mut weights = vec![0.0583931378631895; 3];
        weights.extend([0.0254224531851035; 3]);
        weights.extend([0.041425537809187; 6]);
        rules.insert(12, (6, points, weights));

        rules
    };
}
