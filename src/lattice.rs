use rand::Rng;

// ---------------------------------------------------------------------------
// SpinLattice – square Ising lattice with periodic boundaries
// ---------------------------------------------------------------------------

/// Square spin lattice with periodic boundary conditions.
///
/// Spins are stored row-major and take the values +1 and -1 only. The
/// Hamiltonian is the nearest-neighbour Ising coupling
/// `H = -J * sum_<ij> s_i s_j` with each bond counted once.
#[derive(Debug, Clone)]
pub struct SpinLattice {
    size: usize,
    coupling: f64,
    spins: Vec<i8>,
}

impl SpinLattice {
    /// Hot start: every spin independently +1 or -1 with equal probability.
    pub fn random(size: usize, coupling: f64, rng: &mut impl Rng) -> Self {
        let spins = (0..size * size)
            .map(|_| if rng.random_bool(0.5) { 1 } else { -1 })
            .collect();
        SpinLattice {
            size,
            coupling,
            spins,
        }
    }

    /// Cold start: all spins up, the ground state for ferromagnetic coupling.
    pub fn aligned(size: usize, coupling: f64) -> Self {
        SpinLattice {
            size,
            coupling,
            spins: vec![1; size * size],
        }
    }

    /// Side length of the lattice.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites, `size * size`.
    pub fn n_sites(&self) -> usize {
        self.size * self.size
    }

    /// Nearest-neighbour coupling J.
    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    /// Spin at `(row, col)` with periodic wrap-around on both axes, so
    /// index -1 reads the far edge and index `size` reads index 0.
    pub fn spin(&self, row: isize, col: isize) -> i8 {
        let n = self.size as isize;
        let r = row.rem_euclid(n) as usize;
        let c = col.rem_euclid(n) as usize;
        self.spins[r * self.size + c]
    }

    fn neighbor_sum(&self, row: usize, col: usize) -> f64 {
        let (r, c) = (row as isize, col as isize);
        (self.spin(r - 1, c) + self.spin(r + 1, c) + self.spin(r, c - 1) + self.spin(r, c + 1))
            as f64
    }

    /// Total energy `-J * sum_<ij> s_i s_j`, each bond counted once.
    pub fn total_energy(&self) -> f64 {
        let mut sum = 0.0;
        for row in 0..self.size {
            for col in 0..self.size {
                let s = self.spins[row * self.size + col] as f64;
                sum += -self.coupling * s * self.neighbor_sum(row, col);
            }
        }
        // The site loop visits every bond from both ends.
        0.5 * sum
    }

    /// Total magnetization, the plain sum of all spins.
    pub fn total_magnetization(&self) -> f64 {
        self.spins.iter().map(|&s| f64::from(s)).sum()
    }

    /// Energy and magnetization change a flip of the spin at `(row, col)`
    /// would cause: `dE = 2 J s n`, `dM = -2 s` with `n` the sum of the
    /// four neighbours. Does not mutate the lattice.
    pub fn flip_delta(&self, row: usize, col: usize) -> (f64, f64) {
        let s = f64::from(self.spins[row * self.size + col]);
        let d_energy = 2.0 * self.coupling * s * self.neighbor_sum(row, col);
        let d_magnetization = -2.0 * s;
        (d_energy, d_magnetization)
    }

    /// Flip the spin at `(row, col)`.
    pub fn flip(&mut self, row: usize, col: usize) {
        let idx = row * self.size + col;
        self.spins[idx] = -self.spins[idx];
    }
}
