//! Derivative-free minimization used for the conditional sum of squares

/// Settings for [`minimize`]
#[derive(Debug, Clone, Copy)]
pub struct SimplexSettings {
    pub max_iterations: usize,
    /// Stop once the spread of objective values across the simplex is below this
    pub tolerance: f64,
    /// Also require every vertex within this distance of the best one per axis,
    /// scaled by the best vertex's magnitude when that exceeds one
    pub point_tolerance: f64,
    /// Edge length of the starting simplex along each axis
    pub initial_step: f64,
}

impl Default for SimplexSettings {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-10,
            point_tolerance: 1e-8,
            initial_step: 0.1,
        }
    }
}

/// Best point found by [`minimize`]
#[derive(Debug, Clone)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Nelder-Mead simplex minimization of `objective`, starting at `start`
pub fn minimize<F>(objective: F, start: &[f64], settings: SimplexSettings) -> Minimum
where
    F: Fn(&[f64]) -> f64,
{
    let n = start.len();
    if n == 0 {
        return Minimum {
            point: Vec::new(),
            value: objective(start),
            iterations: 0,
            converged: true,
        };
    }

    let mut simplex: Vec<Vec<f64>> = std::iter::once(start.to_vec())
        .chain((0..n).map(|i| {
            let mut vertex = start.to_vec();
            vertex[i] += settings.initial_step;
            vertex
        }))
        .collect();
    let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    let mut iterations = 0;
    let mut converged = false;
    while iterations < settings.max_iterations {
        iterations += 1;
        order(&mut simplex, &mut values);

        if (values[n] - values[0]).abs() < settings.tolerance
            && diameter(&simplex) <= settings.point_tolerance * scale(&simplex[0])
        {
            converged = true;
            break;
        }

        let centroid = centroid(&simplex[..n]);
        let reflected = towards(&centroid, &simplex[n], -REFLECT);
        let reflected_value = objective(&reflected);

        if reflected_value < values[0] {
            let expanded = towards(&centroid, &simplex[n], -REFLECT * EXPAND);
            let expanded_value = objective(&expanded);
            if expanded_value < reflected_value {
                simplex[n] = expanded;
                values[n] = expanded_value;
            } else {
                simplex[n] = reflected;
                values[n] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[n - 1] {
            simplex[n] = reflected;
            values[n] = reflected_value;
            continue;
        }

        let (contracted, contracted_value) = if reflected_value < values[n] {
            let point = towards(&centroid, &reflected, CONTRACT);
            let value = objective(&point);
            (point, value)
        } else {
            let point = towards(&centroid, &simplex[n], CONTRACT);
            let value = objective(&point);
            (point, value)
        };
        if contracted_value < values[n].min(reflected_value) {
            simplex[n] = contracted;
            values[n] = contracted_value;
            continue;
        }

        let best = simplex[0].clone();
        for i in 1..=n {
            simplex[i] = towards(&best, &simplex[i], SHRINK);
            values[i] = objective(&simplex[i]);
        }
    }

    order(&mut simplex, &mut values);
    Minimum {
        point: simplex.swap_remove(0),
        value: values[0],
        iterations,
        converged,
    }
}

/// Sort vertices by objective value, NaN last
fn order(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut paired: Vec<(f64, Vec<f64>)> = values
        .drain(..)
        .zip(simplex.drain(..))
        .map(|(v, p)| (if v.is_nan() { f64::INFINITY } else { v }, p))
        .collect();
    paired.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (value, point) in paired {
        values.push(value);
        simplex.push(point);
    }
}

/// Largest per-axis distance from the best vertex to any other
fn diameter(simplex: &[Vec<f64>]) -> f64 {
    let best = &simplex[0];
    simplex[1..]
        .iter()
        .flat_map(|vertex| vertex.iter().zip(best).map(|(x, b)| (x - b).abs()))
        .fold(0.0, f64::max)
}

fn scale(point: &[f64]) -> f64 {
    point.iter().fold(1.0, |acc: f64, x| acc.max(x.abs()))
}

fn centroid(vertices: &[Vec<f64>]) -> Vec<f64> {
    let mut sum = vec![0.0; vertices[0].len()];
    for vertex in vertices {
        for (s, x) in sum.iter_mut().zip(vertex) {
            *s += x;
        }
    }
    let count = vertices.len() as f64;
    sum.into_iter().map(|s| s / count).collect()
}

/// `from + t * (to - from)`
fn towards(from: &[f64], to: &[f64], t: f64) -> Vec<f64> {
    from.iter().zip(to).map(|(a, b)| a + t * (b - a)).collect()
}
