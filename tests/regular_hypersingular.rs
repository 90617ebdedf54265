use approx::*;
use bempp_hypersingular::assembly::batched::ElementBlock;
use bempp_hypersingular::assembly::integrator::RegularIntegrator;
use bempp_hypersingular::assembly::{
    assemble_regular_into, DenseMatrix, RegularAssemblerOptions, ScatterMode,
};
use bempp_hypersingular::function::{FunctionSpace, SpaceType};
use bempp_hypersingular::grid::shapes::{regular_sphere, screen};
use bempp_hypersingular::grid::{ElementGeometry, TriangleMesh};
use bempp_hypersingular::kernel::{Laplace3dKernel, ModifiedHelmholtz3dKernel};
use bempp_hypersingular::laplace::assembler::hypersingular_regular;
use bempp_hypersingular::modified_helmholtz::assembler::hypersingular_curl_curl_regular;
use bempp_hypersingular::quadrature::RegularQuadratureRule;
use bempp_hypersingular::{Error, RealScalar};
use paste::paste;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// int_A int_B 1 / (4 pi |x - y|) for the unit right triangle A at the origin and its copy B
/// translated by (3, 0, 0)
const SEPARATED_TRIANGLES_INTEGRAL: f64 = 0.006672043690265972;

fn single_triangle<T: RealScalar>(offset: T) -> TriangleMesh<T> {
    let zero = T::zero();
    let one = T::one();
    TriangleMesh::new(
        vec![
            [offset, zero, zero],
            [offset + one, zero, zero],
            [offset, one, zero],
        ],
        vec![[0, 1, 2]],
    )
    .unwrap()
}

fn assert_matrices_close(a: &DenseMatrix<f64>, b: &DenseMatrix<f64>, tol: f64) {
    assert_eq!(a.shape(), b.shape());
    let scale = a.max_abs().max(b.max_abs());
    for (x, y) in a.data().iter().zip(b.data()) {
        assert_abs_diff_eq!(*x, *y, epsilon = tol * scale);
    }
}

/// Assemble by looping over all cell pairs one at a time
fn sequential_assembly(
    test_space: &FunctionSpace<f64>,
    trial_space: &FunctionSpace<f64>,
    npoints: usize,
) -> DenseMatrix<f64> {
    let kernel = Laplace3dKernel::<f64>::new();
    let rule = RegularQuadratureRule::new(npoints).unwrap();
    let integrator = RegularIntegrator::new(&kernel, &rule);
    let mut k = vec![0.0; integrator.scratch_size()];
    let test_mesh = test_space.mesh();
    let trial_mesh = trial_space.mesh();
    let mut result = DenseMatrix::new_zeros([test_space.global_size(), trial_space.global_size()]);
    for test_cell in 0..test_mesh.number_of_cells() {
        let test = integrator.map_cell(ElementGeometry::new(test_mesh, test_cell));
        let test_dofs = test_space.cell_dofs(test_cell);
        for trial_cell in 0..trial_mesh.number_of_cells() {
            if std::ptr::eq(test_mesh, trial_mesh)
                && test_mesh
                    .cell(test_cell)
                    .iter()
                    .any(|v| trial_mesh.cell(trial_cell).contains(v))
            {
                continue;
            }
            let trial = integrator.map_cell(ElementGeometry::new(trial_mesh, trial_cell));
            let trial_dofs = trial_space.cell_dofs(trial_cell);
            let local = integrator.element_matrix(&test, &trial, &mut k);
            for i in 0..3 {
                for j in 0..3 {
                    let value =
                        local[i][j] * test_dofs.multipliers[i] * trial_dofs.multipliers[j];
                    *result
                        .get_mut(test_dofs.indices[i], trial_dofs.indices[j])
                        .unwrap() += value;
                }
            }
        }
    }
    result
}

macro_rules! separated_triangles_test {
    ($($dtype:ident, $tol:expr),+) => {
        $(
            paste! {
                #[test]
                fn [<test_separated_triangles_ $dtype>]() {
                    let mesh_a = single_triangle::<$dtype>(0.0);
                    let mesh_b = single_triangle::<$dtype>(3.0);
                    let test_space = FunctionSpace::new(&mesh_a, SpaceType::P1);
                    let trial_space = FunctionSpace::new(&mesh_b, SpaceType::P1);
                    let mut options = RegularAssemblerOptions::default();
                    options.set_quadrature_points(3);
                    let matrix =
                        hypersingular_regular(&test_space, &trial_space, &options).unwrap();
                    assert_eq!(matrix.shape(), [3, 3]);
                    let swapped =
                        hypersingular_regular(&trial_space, &test_space, &options).unwrap();

                    // Curls of the three basis functions on either triangle
                    let curls = [[1.0, -1.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]];
                    for i in 0..3 {
                        for j in 0..3 {
                            let value = *matrix.get(i, j).unwrap();
                            assert!(value.is_finite());
                            let dot: f64 = (0..3).map(|d| curls[i][d] * curls[j][d]).sum();
                            let expected = dot * SEPARATED_TRIANGLES_INTEGRAL;
                            assert_abs_diff_eq!(
                                value as f64,
                                expected,
                                epsilon = $tol * SEPARATED_TRIANGLES_INTEGRAL
                            );
                            assert_relative_eq!(
                                value,
                                *swapped.get(j, i).unwrap(),
                                max_relative = 1e-5,
                                epsilon = 1e-9
                            );
                        }
                    }
                }
            }
        )*
    };
}

separated_triangles_test!(f64, 1e-4, f32, 1e-3);

#[test]
fn test_separated_triangles_with_multipliers() {
    let mesh_a = single_triangle::<f64>(0.0);
    let mesh_b = single_triangle::<f64>(3.0);
    let plain_test = FunctionSpace::new(&mesh_a, SpaceType::P1);
    let plain_trial = FunctionSpace::new(&mesh_b, SpaceType::P1);
    let test_multipliers = vec![1.0, -1.0, 2.0];
    let trial_multipliers = vec![0.5, 3.0, -1.0];
    let test_space = FunctionSpace::from_raw(
        &mesh_a,
        SpaceType::P1,
        vec![0, 1, 2],
        test_multipliers.clone(),
        3,
    )
    .unwrap();
    let trial_space = FunctionSpace::from_raw(
        &mesh_b,
        SpaceType::P1,
        vec![2, 0, 1],
        trial_multipliers.clone(),
        3,
    )
    .unwrap();
    let options = RegularAssemblerOptions::default();
    let plain = hypersingular_regular(&plain_test, &plain_trial, &options).unwrap();
    let scaled = hypersingular_regular(&test_space, &trial_space, &options).unwrap();
    let trial_dofs = [2, 0, 1];
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(
                *scaled.get(i, trial_dofs[j]).unwrap(),
                *plain.get(i, j).unwrap() * test_multipliers[i] * trial_multipliers[j],
                max_relative = 1e-14,
                epsilon = 1e-18
            );
        }
    }
}

#[test]
fn test_quadrature_convergence() {
    let mesh_a = single_triangle::<f64>(0.0);
    let mesh_b = single_triangle::<f64>(3.0);
    let test_space = FunctionSpace::new(&mesh_a, SpaceType::P1);
    let trial_space = FunctionSpace::new(&mesh_b, SpaceType::P1);
    let mut options = RegularAssemblerOptions::default();

    let mut assemble = |npoints| {
        options.set_quadrature_points(npoints);
        *hypersingular_regular(&test_space, &trial_space, &options)
            .unwrap()
            .get(0, 0)
            .unwrap()
    };
    let reference = assemble(144);
    assert_relative_eq!(
        reference,
        2.0 * SEPARATED_TRIANGLES_INTEGRAL,
        max_relative = 1e-10
    );
    let errors = [4, 9, 16, 25]
        .iter()
        .map(|n| (assemble(*n) - reference).abs())
        .collect::<Vec<_>>();
    for pair in errors.windows(2) {
        assert!(pair[1] < pair[0]);
    }
}

#[test]
fn test_matches_sequential_assembly() {
    let mesh = regular_sphere::<f64>(2);
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    for mode in [ScatterMode::Atomic, ScatterMode::Coloured] {
        let mut options = RegularAssemblerOptions::default();
        options.set_scatter_mode(mode);
        let matrix = hypersingular_regular(&space, &space, &options).unwrap();
        let reference = sequential_assembly(&space, &space, 6);
        assert_matrices_close(&matrix, &reference, 1e-12);
    }
}

#[test]
fn test_adjacent_pairs_are_excluded() {
    let mesh = screen::<f64>(4);
    let space = FunctionSpace::new(&mesh, SpaceType::DP1);
    let matrix =
        hypersingular_regular(&space, &space, &RegularAssemblerOptions::default()).unwrap();
    for test_cell in 0..mesh.number_of_cells() {
        for trial_cell in 0..mesh.number_of_cells() {
            let adjacent = mesh
                .cell(test_cell)
                .iter()
                .any(|v| mesh.cell(trial_cell).contains(v));
            let block_max = (0..3)
                .flat_map(|i| (0..3).map(move |j| (i, j)))
                .map(|(i, j)| {
                    matrix
                        .get(3 * test_cell + i, 3 * trial_cell + j)
                        .unwrap()
                        .abs()
                })
                .fold(0.0, f64::max);
            if adjacent {
                assert_eq!(block_max, 0.0);
            } else {
                assert!(block_max > 0.0);
            }
        }
    }
}

#[test]
fn test_disjoint_grids() {
    let mesh = regular_sphere::<f64>(1);
    let copy = mesh.clone();
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    let copy_space = FunctionSpace::new(&copy, SpaceType::P1);
    let options = RegularAssemblerOptions::default();

    let same = hypersingular_regular(&space, &space, &options).unwrap();
    // Different mesh objects are treated as disjoint, so adjacent pairs are included
    let disjoint = hypersingular_regular(&space, &copy_space, &options).unwrap();
    assert!((0..space.global_size()).all(|i| *same.get(i, i).unwrap() == 0.0));
    assert!((0..space.global_size()).any(|i| *disjoint.get(i, i).unwrap() != 0.0));

    let mut options = RegularAssemblerOptions::default();
    options.set_grids_disjoint(Some(false));
    let overridden = hypersingular_regular(&space, &copy_space, &options).unwrap();
    assert_matrices_close(&overridden, &same, 1e-14);
}

#[test]
fn test_transpose_symmetry() {
    let mesh = regular_sphere::<f64>(1);
    let p1 = FunctionSpace::new(&mesh, SpaceType::P1);
    let dp1 = FunctionSpace::new(&mesh, SpaceType::DP1);
    let options = RegularAssemblerOptions::default();
    let a = hypersingular_regular(&p1, &dp1, &options).unwrap();
    let b = hypersingular_regular(&dp1, &p1, &options).unwrap();
    assert_matrices_close(&a, &b.transpose(), 1e-12);

    let square = hypersingular_regular(&p1, &p1, &options).unwrap();
    assert_matrices_close(&square, &square.transpose(), 1e-12);
}

#[test]
fn test_rigid_motion_invariance() {
    let mesh = regular_sphere::<f64>(1);
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    let options = RegularAssemblerOptions::default();
    let base = hypersingular_regular(&space, &space, &options).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..3 {
        // Random rotation from a unit quaternion, followed by a random translation
        let mut q = [0.0; 4];
        for x in q.iter_mut() {
            *x = rng.gen_range(-1.0..1.0);
        }
        let norm = q.iter().map(|x| x * x).sum::<f64>().sqrt();
        let [w, x, y, z] = q.map(|v| v / norm);
        let rotation = [
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - z * w),
                2.0 * (x * z + y * w),
            ],
            [
                2.0 * (x * y + z * w),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - x * w),
            ],
            [
                2.0 * (x * z - y * w),
                2.0 * (y * z + x * w),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ];
        let shift: [f64; 3] = [
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        ];
        let moved_mesh = mesh.map_vertices(|v| {
            let mut out = shift;
            for (o, row) in out.iter_mut().zip(rotation.iter()) {
                *o += row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
            }
            out
        });
        let moved_space = FunctionSpace::new(&moved_mesh, SpaceType::P1);
        let moved = hypersingular_regular(&moved_space, &moved_space, &options).unwrap();
        assert_matrices_close(&moved, &base, 1e-10);
    }
}

#[test]
fn test_scaling() {
    let mesh = regular_sphere::<f64>(1);
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    let options = RegularAssemblerOptions::default();
    let base = hypersingular_regular(&space, &space, &options).unwrap();
    for s in [0.5, 2.0, 10.0] {
        let scaled_mesh = mesh.map_vertices(|v| [s * v[0], s * v[1], s * v[2]]);
        let scaled_space = FunctionSpace::new(&scaled_mesh, SpaceType::P1);
        let scaled = hypersingular_regular(&scaled_space, &scaled_space, &options).unwrap();
        let expected = DenseMatrix::from_data(
            base.shape(),
            base.data().iter().map(|v| s * v).collect(),
        )
        .unwrap();
        assert_matrices_close(&scaled, &expected, 1e-10);
    }
}

#[test]
fn test_blocks_sum_to_full_assembly() {
    let mesh = regular_sphere::<f64>(1);
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    let kernel = Laplace3dKernel::<f64>::new();
    let ncells = mesh.number_of_cells();
    let cells = (0..ncells).collect::<Vec<_>>();

    let full = hypersingular_regular(&space, &space, &RegularAssemblerOptions::default()).unwrap();

    // Even and odd test cells, against trial cells split at an offset that is not a multiple
    // of the batch width
    let test_blocks = [
        ElementBlock::new(cells.clone(), 0, ncells / 2, 2),
        ElementBlock::new(cells.clone(), 1, ncells / 2, 2),
    ];
    let trial_blocks = [
        ElementBlock::new(cells.clone(), 0, 11, 1),
        ElementBlock::new(cells.clone(), 11, ncells - 11, 1),
    ];
    let mut blocked = DenseMatrix::new_zeros([space.global_size(), space.global_size()]);
    for test_block in &test_blocks {
        for trial_block in &trial_blocks {
            let mut options = RegularAssemblerOptions::default();
            options.set_test_block(Some(test_block.clone()));
            options.set_trial_block(Some(trial_block.clone()));
            assemble_regular_into(&mut blocked, &kernel, &space, &space, &options).unwrap();
        }
    }
    assert_matrices_close(&blocked, &full, 1e-12);
}

#[test]
fn test_invalid_block_is_rejected() {
    let mesh = screen::<f64>(2);
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    let kernel = Laplace3dKernel::<f64>::new();
    let mut options = RegularAssemblerOptions::default();
    options.set_trial_block(Some(ElementBlock::new(vec![0, 1, 2, 3], 2, 2, 2)));
    let mut output = DenseMatrix::new_zeros([space.global_size(), space.global_size()]);
    assert!(matches!(
        assemble_regular_into(&mut output, &kernel, &space, &space, &options),
        Err(Error::InvalidInput(_))
    ));
    assert_eq!(output.max_abs(), 0.0);
}

#[test]
fn test_output_shape_is_checked() {
    let mesh = screen::<f64>(2);
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    let kernel = Laplace3dKernel::<f64>::new();
    let mut output = DenseMatrix::new_zeros([space.global_size(), space.global_size() + 1]);
    assert!(assemble_regular_into(
        &mut output,
        &kernel,
        &space,
        &space,
        &RegularAssemblerOptions::default()
    )
    .is_err());
}

#[test]
fn test_dp0_is_unsupported() {
    let mesh = regular_sphere::<f64>(0);
    let dp0 = FunctionSpace::new(&mesh, SpaceType::DP0);
    let p1 = FunctionSpace::new(&mesh, SpaceType::P1);
    let options = RegularAssemblerOptions::default();
    assert!(matches!(
        hypersingular_regular(&dp0, &p1, &options),
        Err(Error::UnsupportedSpace(_))
    ));
}

#[test]
fn test_degenerate_cells_are_rejected() {
    let collinear = TriangleMesh::<f64>::new(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [5.0, 5.0, 0.0],
            [6.0, 5.0, 0.0],
            [5.0, 6.0, 0.0],
        ],
        vec![[0, 1, 2], [3, 4, 5]],
    );
    assert!(matches!(collinear, Err(Error::InvalidMesh(_))));

    // Flattening a valid mesh onto a line bypasses the mesh checks
    let mesh = screen::<f64>(2).map_vertices(|v| [v[0] + v[1], 0.0, 0.0]);
    let space = FunctionSpace::new(&mesh, SpaceType::DP1);
    let kernel = Laplace3dKernel::<f64>::new();
    let mut output = DenseMatrix::new_zeros([space.global_size(), space.global_size()]);
    for mode in [ScatterMode::Atomic, ScatterMode::Coloured] {
        let mut options = RegularAssemblerOptions::default();
        options.set_scatter_mode(mode);
        assert!(matches!(
            assemble_regular_into(&mut output, &kernel, &space, &space, &options),
            Err(Error::InvalidInput(_))
        ));
    }
    assert!(output.data().iter().all(|v| *v == 0.0));
}

#[test]
fn test_missing_quadrature_rule() {
    let mesh = regular_sphere::<f64>(0);
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    let mut options = RegularAssemblerOptions::default();
    options.set_quadrature_points(5);
    assert!(matches!(
        hypersingular_regular(&space, &space, &options),
        Err(Error::Quadrature(_))
    ));
}

#[test]
fn test_normal_signs() {
    let mesh = regular_sphere::<f64>(1);
    let flipped = mesh
        .clone()
        .with_normal_signs(vec![-1.0; mesh.number_of_cells()])
        .unwrap();
    let space = FunctionSpace::new(&mesh, SpaceType::P1);
    let flipped_space = FunctionSpace::new(&flipped, SpaceType::P1);
    let mut options = RegularAssemblerOptions::default();
    options.set_grids_disjoint(Some(false));

    let base = hypersingular_regular(&space, &space, &options).unwrap();
    let both = hypersingular_regular(&flipped_space, &flipped_space, &options).unwrap();
    assert_matrices_close(&both, &base, 1e-14);

    let one = hypersingular_regular(&flipped_space, &space, &options).unwrap();
    let negated = DenseMatrix::from_data(
        base.shape(),
        base.data().iter().map(|v| -v).collect(),
    )
    .unwrap();
    assert_matrices_close(&one, &negated, 1e-14);
}

#[test]
fn test_modified_helmholtz() {
    let mesh = regular_sphere::<f64>(1);
    let space = FunctionSpace::new(&mesh, SpaceType::DP1);
    let options = RegularAssemblerOptions::default();
    let laplace = hypersingular_regular(&space, &space, &options).unwrap();
    let zero_omega = hypersingular_curl_curl_regular(0.0, &space, &space, &options).unwrap();
    assert_matrices_close(&zero_omega, &laplace, 1e-14);

    // Each entry of a DP1 matrix comes from a single cell pair, so decay makes every entry
    // smaller in magnitude
    let decayed = hypersingular_curl_curl_regular(1.5, &space, &space, &options).unwrap();
    assert!(decayed.max_abs() > 0.0);
    for (d, l) in decayed.data().iter().zip(laplace.data()) {
        assert!(d.abs() <= l.abs());
    }

    let kernel = ModifiedHelmholtz3dKernel::new(1.5);
    let mut output = DenseMatrix::new_zeros([space.global_size(), space.global_size()]);
    assemble_regular_into(&mut output, &kernel, &space, &space, &options).unwrap();
    assert_matrices_close(&output, &decayed, 1e-14);
}
