use tracing::info;

use crate::closure_impl::ClosureKind;
use crate::solver_impl::Solution;

pub fn report_summary(solution: &Solution) {
    info!("\nStructure calculation finished.");

    if let ClosureKind::RogersYoung { alpha } = solution.closure {
        match solution.ry_consistent {
            Some(true) => info!("Thermodynamically consistent at alpha = {:.5}", alpha),
            _ => info!(
                "WARNING: no thermodynamic consistency found; best-effort alpha = {:.5}",
                alpha
            ),
        }
    }

    let t = &solution.thermo;
    info!("\nThermodynamic summary (units of kT):");
    info!("  beta P (virial route):          {:.8}", t.p_virial);
    info!("  beta P (compressibility route): {:.8}", t.p_compressibility);
    info!("  excess energy per particle:     {:.8}", t.excess_energy);
    info!("  S(k -> 0):                      {:.8}", t.s_zero);
    if let Some(contact) = t.contact {
        info!("  g at contact:                   {:.8}", contact);
    }
    info!(
        "\nFinal density step converged in {} iterations",
        solution.final_iterations
    );
}
