mod taxonomy_properties;
