//! Solve a small system, print the elimination steps and compare determinants

use math_audio_gauss::{CofactorExpansion, LinearSystem, SolverConfig};
use ndarray::array;

fn main() {
    let system = LinearSystem::new(
        array![[0.0, 2.0, 1.0], [1.0, 1.0, 1.0], [2.0, 1.0, 3.0]],
        array![7.0, 6.0, 13.0],
    )
    .expect("valid system");

    let x = system
        .solve_traced(&SolverConfig::default(), |step| println!("{step}"))
        .expect("system is not singular");
    println!("x = {x}");
    println!("residual = {}", system.residual(&x).expect("same length"));
    println!(
        "det = {} (cofactor: {})",
        system.determinant(),
        system.determinant_by(&CofactorExpansion)
    );
}
